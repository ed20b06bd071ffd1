//! Member account discovery: Organizations listings and CSV overrides.

use crate::error::{CoreError, CoreResult};
use crate::event::{AccountRecord, RunStamp};
use crate::ids::AccountId;

/// An account as listed by AWS Organizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `ACTIVE`, `SUSPENDED` or `PENDING_CLOSURE`
    pub status: String,
}

/// Keep active accounts and stamp them for this run.
pub fn active_accounts(accounts: Vec<OrgAccount>, stamp: &RunStamp) -> Vec<AccountRecord> {
    accounts
        .into_iter()
        .filter(|a| a.status == "ACTIVE")
        .filter_map(|a| {
            let id = AccountId::try_new(a.id)?;
            Some(AccountRecord::new(id, a.name, a.email, stamp))
        })
        .collect()
}

/// Parse a user-supplied account list.
///
/// Every line must have exactly three fields. The first line is a header;
/// the `AccountId`, `AccountName` and `AccountEmail` columns are located by
/// case-insensitive name so they may appear in any order.
pub fn parse_account_file(contents: &[u8], stamp: &RunStamp) -> CoreResult<Vec<AccountRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents);

    let (mut id_pos, mut name_pos, mut email_pos) = (0, 0, 0);
    let mut accounts = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != 3 {
            return Err(CoreError::InvalidAccountRow { line: line + 1 });
        }
        if line == 0 {
            for (pos, cell) in row.iter().enumerate() {
                match cell.trim().to_ascii_lowercase().as_str() {
                    "accountid" => id_pos = pos,
                    "accountname" => name_pos = pos,
                    "accountemail" => email_pos = pos,
                    _ => {}
                }
            }
            continue;
        }
        let id = AccountId::try_new(&row[id_pos])
            .ok_or(CoreError::InvalidAccountRow { line: line + 1 })?;
        accounts.push(AccountRecord::new(
            id,
            row[name_pos].trim(),
            row[email_pos].trim(),
            stamp,
        ));
    }
    Ok(accounts)
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
