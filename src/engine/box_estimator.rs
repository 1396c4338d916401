// ==========================================
// 搬家估算引擎 - 纸箱估算引擎
// ==========================================
// 输入: 房屋类型 + 卧室数 + 打包强度
// 输出: 七类纸箱数量 + 房间数
// 红线: 卧室数越界时钳制,不报错
// ==========================================

use crate::domain::estimate::{BoxCounts, EstimateBoxesParams, EstimateBoxesResult};
use crate::domain::types::{PackingIntensity, PropertyType, RoomType};
use crate::engine::tables::room_allocation;
use tracing::{debug, instrument};

// ==========================================
// BoxEstimationEngine - 纸箱估算引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxEstimationEngine {
    // 无状态引擎,只读静态表
}

impl BoxEstimationEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 估算纸箱数量
    ///
    /// 步骤:
    /// 1) 由房屋类型确定固定房间集合
    /// 2) 卧室数钳制到房屋类型的合法区间
    /// 3) 逐间累加房间模板,每间 total_rooms +1
    /// 4) 各字段乘以打包强度倍率后独立四舍五入
    ///
    /// 返回的 total_rooms 为倍率前的房间数
    #[instrument(skip(self), level = "debug")]
    pub fn estimate(
        &self,
        property_type: PropertyType,
        bedrooms: i32,
        packing_intensity: PackingIntensity,
    ) -> EstimateBoxesResult {
        let rooms = self.room_counts(property_type, bedrooms);

        let mut counts = BoxCounts::ZERO;
        let mut total_rooms = 0u32;
        for (room, n) in &rooms {
            let template = room_allocation(*room);
            for _ in 0..*n {
                counts += *template;
                total_rooms += 1;
            }
        }

        let scaled = counts.scaled(packing_intensity.multiplier());
        debug!(
            total_rooms,
            raw_total = counts.total(),
            scaled_total = scaled.total(),
            "纸箱估算完成"
        );

        EstimateBoxesResult {
            counts: scaled,
            total_rooms,
        }
    }

    /// 以参数对象调用
    pub fn estimate_params(&self, params: &EstimateBoxesParams) -> EstimateBoxesResult {
        self.estimate(params.property_type, params.bedrooms, params.packing_intensity)
    }

    /// 房屋配置对应的房间计数（卧室数已钳制）
    ///
    /// 顺序: 卧室在前,固定房间按房屋类型定义顺序
    pub fn room_counts(&self, property_type: PropertyType, bedrooms: i32) -> Vec<(RoomType, u32)> {
        let clamped = property_type.clamp_bedrooms(bedrooms);
        if clamped as i64 != bedrooms as i64 {
            debug!(
                property_type = %property_type,
                requested = bedrooms,
                clamped,
                "卧室数越界,已钳制"
            );
        }

        let mut rooms = Vec::with_capacity(property_type.fixed_rooms().len() + 1);
        rooms.push((RoomType::Bedroom, clamped));
        rooms.extend(property_type.fixed_rooms().iter().map(|room| (*room, 1)));
        rooms
    }
}
