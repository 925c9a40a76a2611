//! One warehouse session: the farmer directory and the season's ledger,
//! driven by raw form values.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use coldstore_core::{DomainError, DomainResult, FarmerId, LedgerId};
use coldstore_farmers::{Farmer, FarmerDirectory, RegisterFarmer};
use coldstore_inventory::{
    CategoryInput, LotSequence, PerCategory, SampleWeights, StockEntry, StockIntake, StockLedger,
    SummaryStats, WithdrawalEntry, WithdrawalRequest,
};

use crate::config::AppConfig;

/// Raw per-category intake fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub bag_count: u32,
    #[serde(default)]
    pub sample_weights: Vec<f64>,
}

/// Raw intake form. Blank `date` means today.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StockEntryForm {
    #[serde(default)]
    pub farmer_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub categories: PerCategory<CategoryForm>,
}

/// Raw withdrawal form. Blank `date` means today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WithdrawalForm {
    #[serde(default)]
    pub farmer_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub lot_number: String,
    #[serde(default)]
    pub bag_counts: PerCategory<u32>,
}

/// Parse the farmer dropdown value. Nothing selected is a validation error.
pub fn parse_farmer_selection(raw: &str) -> DomainResult<FarmerId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation("select a farmer"));
    }
    raw.parse()
        .map_err(|_| DomainError::validation(format!("unknown farmer selection {raw:?}")))
}

/// Parse an ISO `YYYY-MM-DD` date; blank falls back to `today`.
pub fn parse_date(raw: Option<&str>, today: NaiveDate) -> DomainResult<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DomainError::validation(format!("date must be YYYY-MM-DD (got {s:?})"))),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone)]
pub struct WarehouseSession {
    farmers: FarmerDirectory,
    ledger: StockLedger,
}

impl WarehouseSession {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            farmers: FarmerDirectory::new(),
            ledger: StockLedger::with_lot_sequence(
                LedgerId::new(),
                LotSequence::starting_at(config.first_lot),
            ),
        }
    }

    pub fn farmers(&self) -> &FarmerDirectory {
        &self.farmers
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    /// Register a farmer dated today.
    pub fn register_farmer(
        &mut self,
        name: &str,
        father_name: &str,
        phone: &str,
        village: &str,
    ) -> DomainResult<Farmer> {
        self.farmers
            .register(RegisterFarmer::new(name, father_name, phone, village, today()))
    }

    pub fn record_stock_entry(&mut self, form: StockEntryForm) -> DomainResult<StockEntry> {
        let farmer_id = parse_farmer_selection(&form.farmer_id)?;
        let date = parse_date(form.date.as_deref(), today())?;
        let categories = form.categories.try_map(|_, c| {
            SampleWeights::new(&c.sample_weights).map(|w| CategoryInput::new(c.bag_count, w))
        })?;

        self.ledger.record_stock_entry(
            &self.farmers,
            StockIntake {
                farmer_id,
                date,
                remark: form.remark,
                categories,
            },
        )
    }

    pub fn record_withdrawal(&mut self, form: WithdrawalForm) -> DomainResult<WithdrawalEntry> {
        // The form reports a missing farmer and a zero quantity together.
        let farmer_id = parse_farmer_selection(&form.farmer_id).map_err(|_| {
            DomainError::validation("select a farmer and enter a quantity")
        })?;
        let date = parse_date(form.date.as_deref(), today())?;

        self.ledger.record_withdrawal(
            &self.farmers,
            WithdrawalRequest {
                farmer_id,
                date,
                lot_number: form.lot_number,
                bag_counts: form.bag_counts,
            },
        )
    }

    /// Dashboard totals with "today" taken from the UTC clock.
    pub fn summary_stats(&self) -> SummaryStats {
        self.summary_stats_on(today())
    }

    pub fn summary_stats_on(&self, today: NaiveDate) -> SummaryStats {
        self.ledger.summary_stats(today)
    }

    pub fn tentative_lot_number(&self, bag_counts: &PerCategory<u32>, remark: &str) -> String {
        self.ledger.tentative_lot_number(bag_counts.total(), remark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_farmer() -> (WarehouseSession, String) {
        let mut session = WarehouseSession::new(&AppConfig::default());
        let farmer = session
            .register_farmer("Suresh Singh", "Hari Singh", "9876543211", "Shyampur")
            .unwrap();
        (session, farmer.id_typed().to_string())
    }

    fn mota_form(farmer_id: &str, bags: u32, weights: &[f64]) -> StockEntryForm {
        StockEntryForm {
            farmer_id: farmer_id.to_string(),
            date: Some("2024-03-05".to_string()),
            categories: PerCategory {
                mota: CategoryForm {
                    bag_count: bags,
                    sample_weights: weights.to_vec(),
                },
                ..PerCategory::default()
            },
            ..StockEntryForm::default()
        }
    }

    #[test]
    fn empty_selection_is_a_validation_error() {
        assert_eq!(
            parse_farmer_selection("  "),
            Err(DomainError::validation("select a farmer"))
        );
        assert!(parse_farmer_selection("42").unwrap_err().is_validation());
    }

    #[test]
    fn parse_date_defaults_and_validates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date(None, today), Ok(today));
        assert_eq!(parse_date(Some(""), today), Ok(today));
        assert_eq!(
            parse_date(Some("2024-01-15"), today),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert!(parse_date(Some("15/01/2024"), today).is_err());
    }

    #[test]
    fn stock_entry_flows_through_to_ledger() {
        let (mut session, farmer_id) = session_with_farmer();
        let entry = session
            .record_stock_entry(mota_form(&farmer_id, 10, &[40.0, 42.0, 0.0, 0.0, 0.0]))
            .unwrap();
        assert_eq!(entry.lot_number.to_string(), "1/10");
        assert_eq!(entry.total_weight, 410.0);
        assert_eq!(session.ledger().entries().len(), 1);
    }

    #[test]
    fn too_many_samples_rejected_before_ledger() {
        let (mut session, farmer_id) = session_with_farmer();
        let err = session
            .record_stock_entry(mota_form(&farmer_id, 10, &[40.0; 6]))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.ledger().next_lot_sequence(), 1);
    }

    #[test]
    fn first_lot_comes_from_config() {
        let config = AppConfig {
            first_lot: 300,
            ..AppConfig::default()
        };
        let mut session = WarehouseSession::new(&config);
        let farmer = session
            .register_farmer("Mohan Lal", "Gopal Das", "9876543212", "Gopalpur")
            .unwrap();
        let entry = session
            .record_stock_entry(mota_form(&farmer.id_typed().to_string(), 2, &[50.0]))
            .unwrap();
        assert_eq!(entry.lot_number.to_string(), "300/2");
    }

    #[test]
    fn withdrawal_without_farmer_uses_combined_message() {
        let (mut session, _) = session_with_farmer();
        let err = session
            .record_withdrawal(WithdrawalForm {
                lot_number: "1/10".to_string(),
                bag_counts: PerCategory::new(1, 0, 0),
                ..WithdrawalForm::default()
            })
            .unwrap_err();
        assert_eq!(err, DomainError::validation("select a farmer and enter a quantity"));
    }

    #[test]
    fn summary_counts_entries_dated_today() {
        let (mut session, farmer_id) = session_with_farmer();
        let mut form = mota_form(&farmer_id, 10, &[40.0]);
        form.date = Some("2024-03-09".to_string());
        session.record_stock_entry(form).unwrap();
        session
            .record_stock_entry(mota_form(&farmer_id, 5, &[40.0]))
            .unwrap();

        let stats = session.summary_stats_on(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(stats.total_bags, 15);
        assert_eq!(stats.today_bags, 10);
    }

    #[test]
    fn last_configured_lot_rejects_entry_instead_of_wrapping() {
        let config = AppConfig::from_lookup(|key| {
            (key == crate::config::FIRST_LOT_VAR).then(|| u64::MAX.to_string())
        })
        .unwrap();
        let mut session = WarehouseSession::new(&config);
        let farmer = session
            .register_farmer("Mohan Lal", "Gopal Das", "9876543212", "Gopalpur")
            .unwrap();

        let err = session
            .record_stock_entry(mota_form(&farmer.id_typed().to_string(), 1, &[50.0]))
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for exhausted lot sequence"),
        }
        assert!(session.ledger().entries().is_empty());
        assert_eq!(session.ledger().next_lot_sequence(), u64::MAX);
    }

    #[test]
    fn tentative_lot_sums_counts() {
        let (session, _) = session_with_farmer();
        assert_eq!(session.tentative_lot_number(&PerCategory::new(3, 2, 1), ""), "1/6");
        assert_eq!(session.tentative_lot_number(&PerCategory::default(), "note"), "1/-*");
    }
}
