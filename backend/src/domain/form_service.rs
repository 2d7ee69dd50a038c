//! One-message forms for creating pools and entering bids.
//!
//! A `FormSession` is an explicit value owned by whoever runs the conversation;
//! nothing here keeps per-user state. A reply can be one value per line,
//! `|`-separated values in field order, or `key=value` pairs.

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

use crate::domain::bid_service::BidService;
use crate::domain::commands::bid::{SubmitBidCommand, SubmitBidResult};
use crate::domain::commands::pool::{CreatePoolCommand, CreatePoolResult};
use crate::domain::dates::format_user_date;
use crate::domain::error::HuiError;
use crate::domain::pool_service::PoolService;

const CREATE_POOL_FIELDS: &[&str] = &["ten", "chu_ky", "ngay", "sochan", "menhgia", "san", "tran", "thau"];
const SUBMIT_BID_FIELDS: &[&str] = &["maday", "ky", "sotientham", "ngay"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreatePool,
    SubmitBid,
}

impl FormKind {
    pub fn parse(text: &str) -> Result<Self, HuiError> {
        match text.trim().to_lowercase().as_str() {
            "create-pool" | "tao" => Ok(FormKind::CreatePool),
            "submit-bid" | "tham" => Ok(FormKind::SubmitBid),
            _ => Err(HuiError::parse(text, "unknown form, expected create-pool or submit-bid")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::CreatePool => "create-pool",
            FormKind::SubmitBid => "submit-bid",
        }
    }

    pub fn expected_fields(&self) -> &'static [&'static str] {
        match self {
            FormKind::CreatePool => CREATE_POOL_FIELDS,
            FormKind::SubmitBid => SUBMIT_BID_FIELDS,
        }
    }
}

/// Pending form for one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    pub kind: FormKind,
    pub expected_fields: Vec<&'static str>,
}

impl FormSession {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            expected_fields: kind.expected_fields().to_vec(),
        }
    }

    /// Fill-in instructions shown when the form is opened
    pub fn template(&self) -> String {
        match self.kind {
            FormKind::CreatePool => [
                "Reply in one message, one value per line or separated by |:",
                "1) Pool name (e.g. Hui10tr)",
                "2) Period: tuan or thang",
                "3) Opening date DD-MM-YYYY or D-M-YY (e.g. 10-10-2025)",
                "4) Number of legs (e.g. 12)",
                "5) Face value M (e.g. 10tr, 2500k, 2.5tr)",
                "6) Floor % (e.g. 8)",
                "7) Cap % (e.g. 20)",
                "8) Fee % (e.g. 5)",
                "Example: Hui10tr | tuan | 10-10-2025 | 12 | 10tr | 8 | 20 | 5",
            ]
            .join("\n"),
            FormKind::SubmitBid => [
                "Reply in one message, one value per line or separated by |:",
                "1) Pool id (e.g. 1)",
                "2) Period (e.g. 3)",
                "3) Bid amount (e.g. 2tr, 750k)",
                "4) Date DD-MM-YYYY (blank means today)",
                "Example: 1 | 3 | 2tr | 10-10-2025",
            ]
            .join("\n"),
        }
    }

    /// Split a reply into field values.
    ///
    /// Keys outside this form are dropped; missing fields are simply absent.
    pub fn parse_reply(&self, text: &str) -> BTreeMap<&'static str, String> {
        let text = text.trim();
        let mut values = BTreeMap::new();

        if text.contains('=') {
            for part in text.split(['|', '\n', ';']) {
                let Some((key, value)) = part.split_once('=') else {
                    continue;
                };
                let key = key.trim().to_lowercase();
                let key = canonical_key(&key);
                if let Some(field) = self.expected_fields.iter().find(|field| **field == key) {
                    values.insert(*field, value.trim().to_string());
                }
            }
            return values;
        }

        let parts = text
            .split(['|', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty());
        for (field, part) in self.expected_fields.iter().zip(parts) {
            values.insert(*field, part.to_string());
        }
        values
    }
}

fn canonical_key(key: &str) -> &str {
    match key {
        "tuan" | "thang" | "chu_ky" => "chu_ky",
        "sochan" | "chan" | "so_chans" => "sochan",
        "menhgia" | "menh_gia" => "menhgia",
        "sotientham" | "sotien" => "sotientham",
        other => other,
    }
}

fn required<'a>(values: &'a BTreeMap<&'static str, String>, field: &str) -> Result<&'a str, HuiError> {
    values
        .get(field)
        .map(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HuiError::parse("", format!("missing field {}", field)))
}

fn parse_count<T: std::str::FromStr>(text: &str, field: &str) -> Result<T, HuiError> {
    text.trim()
        .parse()
        .map_err(|_| HuiError::parse(text, format!("{} must be a whole number", field)))
}

/// `8`, `8%`, `7,5` all read as percentages
fn parse_rate(text: &str, field: &str) -> Result<f64, HuiError> {
    text.trim()
        .trim_end_matches('%')
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| HuiError::parse(text, format!("{} must be a percentage", field)))
}

pub fn into_create_pool_command(values: &BTreeMap<&'static str, String>) -> Result<CreatePoolCommand, HuiError> {
    Ok(CreatePoolCommand {
        name: required(values, "ten")?.to_string(),
        period_kind: required(values, "chu_ky")?.to_string(),
        start_date: required(values, "ngay")?.to_string(),
        leg_count: parse_count(required(values, "sochan")?, "sochan")?,
        face_value: required(values, "menhgia")?.to_string(),
        floor_rate: parse_rate(required(values, "san")?, "san")?,
        cap_rate: parse_rate(required(values, "tran")?, "tran")?,
        fee_rate: parse_rate(required(values, "thau")?, "thau")?,
    })
}

/// A blank or missing date is recorded as `today`
pub fn into_submit_bid_command(
    values: &BTreeMap<&'static str, String>,
    today: NaiveDate,
) -> Result<SubmitBidCommand, HuiError> {
    let date = values
        .get("ngay")
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format_user_date(today));

    Ok(SubmitBidCommand {
        pool_id: parse_count(required(values, "maday")?, "maday")?,
        period: parse_count(required(values, "ky")?, "ky")?,
        amount: required(values, "sotientham")?.to_string(),
        date: Some(date),
    })
}

#[derive(Debug, Clone)]
pub enum FormOutcome {
    PoolCreated(CreatePoolResult),
    BidSubmitted(SubmitBidResult),
}

#[derive(Clone)]
pub struct FormService {
    pool_service: PoolService,
    bid_service: BidService,
}

impl FormService {
    pub fn new(pool_service: PoolService, bid_service: BidService) -> Self {
        Self {
            pool_service,
            bid_service,
        }
    }

    pub fn open(&self, kind: FormKind) -> FormSession {
        debug!("Opening {} form", kind.as_str());
        FormSession::new(kind)
    }

    /// Parse a reply against `session` and run the matching operation
    pub fn submit(&self, session: &FormSession, reply: &str, today: NaiveDate) -> Result<FormOutcome> {
        info!("Submitting {} form", session.kind.as_str());
        let values = session.parse_reply(reply);

        match session.kind {
            FormKind::CreatePool => {
                let command = into_create_pool_command(&values)?;
                Ok(FormOutcome::PoolCreated(self.pool_service.create_pool(command)?))
            }
            FormKind::SubmitBid => {
                let command = into_submit_bid_command(&values, today)?;
                Ok(FormOutcome::BidSubmitted(self.bid_service.submit_bid(command)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 12).unwrap()
    }

    fn setup() -> (TestEnvironment, FormService) {
        let env = TestEnvironment::new().unwrap();
        let pool_service = PoolService::new(env.shared_connection());
        let bid_service = BidService::new(env.shared_connection(), pool_service.clone());
        (env, FormService::new(pool_service, bid_service))
    }

    #[test]
    fn test_parse_reply_positional_pipe() {
        let session = FormSession::new(FormKind::CreatePool);
        let values = session.parse_reply("Hui10tr | tuan | 10-10-2025 | 12 | 10tr | 8 | 20 | 5");
        assert_eq!(values.len(), 8);
        assert_eq!(values["ten"], "Hui10tr");
        assert_eq!(values["menhgia"], "10tr");
        assert_eq!(values["thau"], "5");
    }

    #[test]
    fn test_parse_reply_one_per_line_skips_blank_lines() {
        let session = FormSession::new(FormKind::SubmitBid);
        let values = session.parse_reply("1\n\n3\n2tr\n");
        assert_eq!(values["maday"], "1");
        assert_eq!(values["ky"], "3");
        assert_eq!(values["sotientham"], "2tr");
        assert!(!values.contains_key("ngay"));
    }

    #[test]
    fn test_parse_reply_key_value_aliases() {
        let session = FormSession::new(FormKind::CreatePool);
        let values = session.parse_reply("TEN=Hui5tr; thang=thang | chan=10\nmenh_gia=5tr; gio=7; color=red");
        assert_eq!(values["ten"], "Hui5tr");
        assert_eq!(values["chu_ky"], "thang");
        assert_eq!(values["sochan"], "10");
        assert_eq!(values["menhgia"], "5tr");
        assert_eq!(values.len(), 4);

        let bid = FormSession::new(FormKind::SubmitBid);
        let values = bid.parse_reply("maday=2|ky=4|sotien=750k");
        assert_eq!(values["sotientham"], "750k");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let session = FormSession::new(FormKind::CreatePool);
        let values = session.parse_reply("Hui10tr | tuan | 10-10-2025");
        let err = into_create_pool_command(&values).unwrap_err();
        assert!(err.to_string().contains("missing field sochan"));
    }

    #[test]
    fn test_rates_accept_percent_and_comma() {
        let session = FormSession::new(FormKind::CreatePool);
        let values = session.parse_reply("A | tuan | 10-10-2025 | 12 | 10tr | 8% | 20 | 7,5");
        let command = into_create_pool_command(&values).unwrap();
        assert_eq!(command.floor_rate, 8.0);
        assert_eq!(command.fee_rate, 7.5);
        assert_eq!(command.leg_count, 12);
    }

    #[test]
    fn test_blank_bid_date_means_today() {
        let session = FormSession::new(FormKind::SubmitBid);
        let command = into_submit_bid_command(&session.parse_reply("1 | 3 | 2tr"), today()).unwrap();
        assert_eq!(command.date.as_deref(), Some("12-10-2025"));

        let command = into_submit_bid_command(&session.parse_reply("maday=1|ky=3|sotien=2tr|ngay="), today()).unwrap();
        assert_eq!(command.date.as_deref(), Some("12-10-2025"));

        let err = into_submit_bid_command(&session.parse_reply("x | 3 | 2tr"), today()).unwrap_err();
        assert!(matches!(err, HuiError::Parse { .. }));
    }

    #[test]
    fn test_form_kind_parse() {
        assert_eq!(FormKind::parse("create-pool").unwrap(), FormKind::CreatePool);
        assert_eq!(FormKind::parse("Tham").unwrap(), FormKind::SubmitBid);
        assert!(FormKind::parse("close").is_err());
        assert!(FormSession::new(FormKind::SubmitBid).template().contains("blank means today"));
    }

    #[test]
    fn test_submit_runs_operations() {
        let (_env, service) = setup();

        let created = service
            .submit(
                &service.open(FormKind::CreatePool),
                "Hui10tr\ntuan\n10-10-2025\n12\n10tr\n8\n20\n5",
                today(),
            )
            .unwrap();
        let pool = match created {
            FormOutcome::PoolCreated(result) => result.pool,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(pool.face_value, 10_000_000);

        let submitted = service
            .submit(&service.open(FormKind::SubmitBid), "1 | 1 | 800k", today())
            .unwrap();
        match submitted {
            FormOutcome::BidSubmitted(result) => {
                assert_eq!(result.bid.amount, 800_000);
                assert_eq!(result.bid.date, Some(today()));
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let err = service
            .submit(&service.open(FormKind::SubmitBid), "1 | 1 | 5tr", today())
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<HuiError>(), Some(HuiError::BidOutOfRange { .. })));
    }
}
