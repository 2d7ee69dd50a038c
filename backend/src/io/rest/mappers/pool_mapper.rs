use shared::{
    ClosePoolResponse, CreatePoolRequest, CreatePoolResponse, DeletePoolResponse, PeriodKind, Pool,
    PoolListResponse, PoolStatus,
};

use crate::domain::commands::pool::{
    ClosePoolResult, CreatePoolCommand, CreatePoolResult, DeletePoolResult, ListPoolsResult,
};
use crate::domain::dates::format_iso_date;
use crate::domain::formatting::pool_list_line;
use crate::domain::models::{PeriodKind as DomainPeriodKind, Pool as DomainPool, PoolStatus as DomainPoolStatus};

pub struct PoolMapper;

impl PoolMapper {
    pub fn period_kind_to_dto(kind: DomainPeriodKind) -> PeriodKind {
        match kind {
            DomainPeriodKind::Weekly => PeriodKind::Weekly,
            DomainPeriodKind::Monthly => PeriodKind::Monthly,
        }
    }

    pub fn status_to_dto(status: DomainPoolStatus) -> PoolStatus {
        match status {
            DomainPoolStatus::Open => PoolStatus::Open,
            DomainPoolStatus::Closed => PoolStatus::Closed,
        }
    }

    pub fn to_dto(pool: DomainPool) -> Pool {
        Pool {
            display: pool_list_line(&pool),
            fee_amount: pool.fee_amount(),
            floor_amount: pool.floor_amount(),
            cap_amount: pool.cap_amount(),
            period_kind: Self::period_kind_to_dto(pool.period_kind),
            start_date: format_iso_date(pool.start_date),
            status: Self::status_to_dto(pool.status),
            reminder_time: pool.reminder.to_string(),
            last_reminded_on: pool.last_reminded_on.map(format_iso_date),
            created_at: pool.created_at.to_rfc3339(),
            id: pool.id,
            name: pool.name,
            leg_count: pool.leg_count,
            face_value: pool.face_value,
            floor_rate: pool.floor_rate,
            cap_rate: pool.cap_rate,
            fee_rate: pool.fee_rate,
        }
    }

    pub fn to_dto_list(pools: Vec<DomainPool>) -> Vec<Pool> {
        pools.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreatePoolRequest) -> CreatePoolCommand {
        CreatePoolCommand {
            name: request.name,
            period_kind: request.period_kind,
            start_date: request.start_date,
            leg_count: request.leg_count,
            face_value: request.face_value,
            floor_rate: request.floor_rate,
            cap_rate: request.cap_rate,
            fee_rate: request.fee_rate,
        }
    }

    pub fn to_create_response(result: CreatePoolResult) -> CreatePoolResponse {
        let success_message = format!("Created pool #{} ({})", result.pool.id, result.pool.name);
        CreatePoolResponse {
            pool: Self::to_dto(result.pool),
            success_message,
        }
    }

    pub fn to_list_response(result: ListPoolsResult) -> PoolListResponse {
        PoolListResponse {
            pools: Self::to_dto_list(result.pools),
        }
    }

    pub fn to_close_response(result: ClosePoolResult) -> ClosePoolResponse {
        ClosePoolResponse {
            pool: Self::to_dto(result.pool),
            newly_closed: result.newly_closed,
        }
    }

    pub fn to_delete_response(result: DeletePoolResult) -> DeletePoolResponse {
        DeletePoolResponse {
            success_message: format!(
                "Deleted pool #{} and {} bids",
                result.pool_id, result.deleted_bids
            ),
            pool_id: result.pool_id,
            deleted_bids: result.deleted_bids,
        }
    }
}
