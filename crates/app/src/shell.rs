//! Newline-delimited JSON command shell.
//!
//! Each input line is one request object tagged by `op`; each output line is
//! `{"ok": true, "data": ...}` or `{"ok": false, "error": code, "message": ...}`.
//! A bad line produces an error response and the loop carries on.

use std::io::{BufRead, Write};

use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

use coldstore_inventory::PerCategory;

use crate::error::AppError;
use crate::session::{StockEntryForm, WarehouseSession, WithdrawalForm};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    RegisterFarmer {
        name: String,
        father_name: String,
        phone: String,
        village: String,
    },
    RecordStockEntry(StockEntryForm),
    RecordWithdrawal(WithdrawalForm),
    Summary,
    TentativeLot {
        #[serde(default)]
        bag_counts: PerCategory<u32>,
        #[serde(default)]
        remark: String,
    },
    LookupLot {
        lot_number: String,
    },
    ListFarmers,
    ListEntries,
    ListWithdrawals,
}

pub fn ok(data: JsonValue) -> JsonValue {
    json!({ "ok": true, "data": data })
}

pub fn error(err: &AppError) -> JsonValue {
    json!({ "ok": false, "error": err.code(), "message": err.to_string() })
}

/// Execute one decoded request against the session.
pub fn dispatch(session: &mut WarehouseSession, request: Request) -> Result<JsonValue, AppError> {
    let data = match request {
        Request::RegisterFarmer {
            name,
            father_name,
            phone,
            village,
        } => serde_json::to_value(session.register_farmer(&name, &father_name, &phone, &village)?)?,
        Request::RecordStockEntry(form) => serde_json::to_value(session.record_stock_entry(form)?)?,
        Request::RecordWithdrawal(form) => serde_json::to_value(session.record_withdrawal(form)?)?,
        Request::Summary => serde_json::to_value(session.summary_stats())?,
        Request::TentativeLot { bag_counts, remark } => {
            json!({ "lot_number": session.tentative_lot_number(&bag_counts, &remark) })
        }
        Request::LookupLot { lot_number } => {
            let ledger = session.ledger();
            json!({
                "entry": ledger.entry_by_lot(&lot_number),
                "withdrawals": ledger.withdrawals_for_lot(&lot_number),
            })
        }
        Request::ListFarmers => serde_json::to_value(session.farmers().list())?,
        Request::ListEntries => serde_json::to_value(session.ledger().entries())?,
        Request::ListWithdrawals => serde_json::to_value(session.ledger().withdrawals())?,
    };
    Ok(data)
}

/// Decode and execute one input line, always yielding a response object.
pub fn handle_line(session: &mut WarehouseSession, line: &str) -> JsonValue {
    let result = serde_json::from_str::<Request>(line)
        .map_err(AppError::from)
        .and_then(|request| dispatch(session, request));

    match result {
        Ok(data) => ok(data),
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "request failed");
            error(&err)
        }
    }
}

/// Run the shell until the reader is exhausted. Blank lines are skipped.
pub fn run<R: BufRead, W: Write>(
    session: &mut WarehouseSession,
    reader: R,
    mut writer: W,
) -> Result<(), AppError> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(session, &line);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    Ok(())
}
