use core::str::FromStr;

use serde::{Deserialize, Serialize};

use coldstore_core::DomainError;

/// Potato size/quality grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mota,
    Gulla,
    Kirri,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Mota, Category::Gulla, Category::Kirri];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mota => "mota",
            Category::Gulla => "gulla",
            Category::Kirri => "kirri",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mota" => Ok(Category::Mota),
            "gulla" => Ok(Category::Gulla),
            "kirri" => Ok(Category::Kirri),
            _ => Err(DomainError::validation(
                "category must be one of: mota, gulla, kirri",
            )),
        }
    }
}

/// One value per category. Missing keys deserialize to the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    #[serde(default)]
    pub mota: T,
    #[serde(default)]
    pub gulla: T,
    #[serde(default)]
    pub kirri: T,
}

impl<T> PerCategory<T> {
    pub fn new(mota: T, gulla: T, kirri: T) -> Self {
        Self { mota, gulla, kirri }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Mota => &self.mota,
            Category::Gulla => &self.gulla,
            Category::Kirri => &self.kirri,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Mota => &mut self.mota,
            Category::Gulla => &mut self.gulla,
            Category::Kirri => &mut self.kirri,
        }
    }

    /// Pairs in fixed order: mota, gulla, kirri.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> PerCategory<U> {
        PerCategory {
            mota: f(Category::Mota, &self.mota),
            gulla: f(Category::Gulla, &self.gulla),
            kirri: f(Category::Kirri, &self.kirri),
        }
    }

    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(Category, &T) -> Result<U, E>,
    ) -> Result<PerCategory<U>, E> {
        Ok(PerCategory {
            mota: f(Category::Mota, &self.mota)?,
            gulla: f(Category::Gulla, &self.gulla)?,
            kirri: f(Category::Kirri, &self.kirri)?,
        })
    }
}

impl PerCategory<u32> {
    /// Sum of the three bag counts.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, n)| u64::from(*n)).sum()
    }
}
