// ==========================================
// 搬家估算引擎 - 工时估算引擎
// ==========================================
// 输入: 纸箱数量 + 房间数 + 可选服务类型
// 输出: 打包分钟 / 拆包分钟
// 顺序: 加权求和 → 加每间房开销 → 服务倍率 → 四舍五入
// ==========================================

use crate::domain::estimate::{round_half_up, BoxCounts, EstimateTimeParams, EstimateTimeResult};
use crate::domain::types::ServiceType;
use crate::engine::tables::{MinuteTable, PACK_MINUTES, UNPACK_MINUTES};
use tracing::{debug, instrument};

// ==========================================
// TimeEstimationEngine - 工时估算引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TimeEstimationEngine {
    pack: MinuteTable,
    unpack: MinuteTable,
}

impl Default for TimeEstimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeEstimationEngine {
    /// 使用固定分钟表
    pub fn new() -> Self {
        Self {
            pack: PACK_MINUTES,
            unpack: UNPACK_MINUTES,
        }
    }

    pub fn pack_table(&self) -> &MinuteTable {
        &self.pack
    }

    pub fn unpack_table(&self) -> &MinuteTable {
        &self.unpack
    }

    /// 估算打包/拆包分钟
    ///
    /// 服务倍率在每间房开销加入之后施加;
    /// 只有 White Glove 有倍率,None 与其它服务类型均不加成
    #[instrument(skip(self, params), level = "debug", fields(total_rooms = params.total_rooms))]
    pub fn estimate(&self, params: &EstimateTimeParams) -> EstimateTimeResult {
        let multiplier = params
            .service_type
            .as_ref()
            .map(ServiceType::time_multiplier)
            .unwrap_or(1.0);

        let pack_minutes =
            round_half_up(self.raw_minutes(&self.pack, &params.counts, params.total_rooms) * multiplier);
        let unpack_minutes = round_half_up(
            self.raw_minutes(&self.unpack, &params.counts, params.total_rooms) * multiplier,
        );

        debug!(pack_minutes, unpack_minutes, multiplier, "工时估算完成");

        EstimateTimeResult {
            pack_minutes,
            unpack_minutes,
        }
    }

    /// 加倍率前的分钟数 = Σ 箱数×每箱分钟 + 房间数×每间开销
    fn raw_minutes(&self, table: &MinuteTable, counts: &BoxCounts, total_rooms: u32) -> f64 {
        let box_minutes = table.weighted_sum(counts);
        let room_minutes = total_rooms as u64 * table.extra_per_room as u64;
        (box_minutes + room_minutes) as f64
    }
}
