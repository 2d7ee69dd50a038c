use shared::{Bid, BidListResponse, SubmitBidRequest, SubmitBidResponse};

use crate::domain::commands::bid::{ListBidsResult, SubmitBidCommand, SubmitBidResult};
use crate::domain::dates::format_iso_date;
use crate::domain::models::Bid as DomainBid;
use crate::domain::money::format_vnd_label;

pub struct BidMapper;

impl BidMapper {
    pub fn to_dto(bid: DomainBid) -> Bid {
        Bid {
            pool_id: bid.pool_id,
            period: bid.period,
            amount: bid.amount,
            date: bid.date.map(format_iso_date),
        }
    }

    pub fn to_dto_list(bids: Vec<DomainBid>) -> Vec<Bid> {
        bids.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_submit_command(pool_id: u64, request: SubmitBidRequest) -> SubmitBidCommand {
        SubmitBidCommand {
            pool_id,
            period: request.period,
            amount: request.amount,
            date: request.date,
        }
    }

    pub fn to_submit_response(result: SubmitBidResult) -> SubmitBidResponse {
        let success_message = match &result.replaced {
            Some(previous) => format!(
                "Period {} bid updated: {} -> {}",
                result.bid.period,
                format_vnd_label(previous.amount),
                format_vnd_label(result.bid.amount)
            ),
            None => format!(
                "Period {} bid recorded: {}",
                result.bid.period,
                format_vnd_label(result.bid.amount)
            ),
        };
        SubmitBidResponse {
            replaced_previous: result.replaced.map(|previous| previous.amount),
            bid: Self::to_dto(result.bid),
            success_message,
        }
    }

    pub fn to_list_response(result: ListBidsResult) -> BidListResponse {
        BidListResponse {
            pool_id: result.pool.id,
            bids: Self::to_dto_list(result.bids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bid(amount: i64) -> DomainBid {
        DomainBid {
            pool_id: 1,
            period: 2,
            amount,
            date: NaiveDate::from_ymd_opt(2025, 10, 17),
        }
    }

    #[test]
    fn test_submit_response_mentions_overwrite() {
        let fresh = BidMapper::to_submit_response(SubmitBidResult { bid: bid(800_000), replaced: None });
        assert_eq!(fresh.success_message, "Period 2 bid recorded: 800,000 VND");
        assert_eq!(fresh.bid.date.as_deref(), Some("2025-10-17"));

        let updated = BidMapper::to_submit_response(SubmitBidResult {
            bid: bid(1_000_000),
            replaced: Some(bid(800_000)),
        });
        assert_eq!(updated.replaced_previous, Some(800_000));
        assert_eq!(updated.success_message, "Period 2 bid updated: 800,000 VND -> 1,000,000 VND");
    }
}
