// ==========================================
// 搬家估算引擎 - 估算值对象
// ==========================================
// BoxCounts / 估算参数 / 估算结果
// 全部为值对象,单次调用内创建,不跨请求共享
// ==========================================

use crate::domain::types::{BoxType, PackingIntensity, PropertyType, ServiceType};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

// ==========================================
// BoxCounts - 七类纸箱计数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
    pub wardrobe: u32,
    pub dish_pack: u32,
    pub mattress_bag: u32,
    pub tv_box: u32,
}

impl BoxCounts {
    /// 全零计数
    pub const ZERO: BoxCounts = BoxCounts::new(0, 0, 0, 0, 0, 0, 0);

    /// 按 small/medium/large/wardrobe/dishPack/mattressBag/tvBox 顺序构造
    pub const fn new(
        small: u32,
        medium: u32,
        large: u32,
        wardrobe: u32,
        dish_pack: u32,
        mattress_bag: u32,
        tv_box: u32,
    ) -> Self {
        Self {
            small,
            medium,
            large,
            wardrobe,
            dish_pack,
            mattress_bag,
            tv_box,
        }
    }

    pub fn get(&self, box_type: BoxType) -> u32 {
        match box_type {
            BoxType::Small => self.small,
            BoxType::Medium => self.medium,
            BoxType::Large => self.large,
            BoxType::Wardrobe => self.wardrobe,
            BoxType::DishPack => self.dish_pack,
            BoxType::MattressBag => self.mattress_bag,
            BoxType::TvBox => self.tv_box,
        }
    }

    pub fn get_mut(&mut self, box_type: BoxType) -> &mut u32 {
        match box_type {
            BoxType::Small => &mut self.small,
            BoxType::Medium => &mut self.medium,
            BoxType::Large => &mut self.large,
            BoxType::Wardrobe => &mut self.wardrobe,
            BoxType::DishPack => &mut self.dish_pack,
            BoxType::MattressBag => &mut self.mattress_bag,
            BoxType::TvBox => &mut self.tv_box,
        }
    }

    /// 纸箱总数（饱和相加）
    pub fn total(&self) -> u32 {
        BoxType::ALL
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(self.get(*b)))
    }

    /// 按倍率缩放,每个字段独立四舍五入（不是对总数取整）
    ///
    /// 倍率非负时结果不会出现负数
    pub fn scaled(&self, factor: f64) -> BoxCounts {
        let mut out = BoxCounts::ZERO;
        for box_type in BoxType::ALL {
            *out.get_mut(box_type) = round_half_up(self.get(box_type) as f64 * factor);
        }
        out
    }

    /// 逐字段乘以整数倍（饱和）
    pub fn times(&self, n: u32) -> BoxCounts {
        let mut out = BoxCounts::ZERO;
        for box_type in BoxType::ALL {
            *out.get_mut(box_type) = self.get(box_type).saturating_mul(n);
        }
        out
    }

    /// 逐字段 (纸箱类型, 数量) 迭代
    pub fn iter(&self) -> impl Iterator<Item = (BoxType, u32)> + '_ {
        BoxType::ALL.into_iter().map(move |b| (b, self.get(b)))
    }
}

impl AddAssign for BoxCounts {
    fn add_assign(&mut self, rhs: BoxCounts) {
        for box_type in BoxType::ALL {
            let field = self.get_mut(box_type);
            *field = field.saturating_add(rhs.get(box_type));
        }
    }
}

impl Add for BoxCounts {
    type Output = BoxCounts;

    fn add(mut self, rhs: BoxCounts) -> BoxCounts {
        self += rhs;
        self
    }
}

/// 四舍五入到非负整数（.5 向上）
pub(crate) fn round_half_up(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

// ==========================================
// 纸箱估算
// ==========================================

/// 纸箱估算参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBoxesParams {
    pub property_type: PropertyType,
    /// 原始卧室数（未钳制,允许负数与超上限）
    pub bedrooms: i32,
    pub packing_intensity: PackingIntensity,
}

/// 纸箱估算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBoxesResult {
    pub counts: BoxCounts,
    /// 房间数（倍率前）
    pub total_rooms: u32,
}

// ==========================================
// 工时估算
// ==========================================

/// 工时估算参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTimeParams {
    pub counts: BoxCounts,
    pub total_rooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
}

/// 工时估算结果（分钟）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTimeResult {
    pub pack_minutes: u32,
    pub unpack_minutes: u32,
}

// ==========================================
// 组合估算
// ==========================================

/// 组合估算参数 = 纸箱估算参数 + 可选服务类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateAllParams {
    pub property_type: PropertyType,
    pub bedrooms: i32,
    pub packing_intensity: PackingIntensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
}

impl EstimateAllParams {
    pub fn boxes_params(&self) -> EstimateBoxesParams {
        EstimateBoxesParams {
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            packing_intensity: self.packing_intensity,
        }
    }
}

/// 组合估算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedEstimate {
    pub counts: BoxCounts,
    pub total_rooms: u32,
    pub pack_minutes: u32,
    pub unpack_minutes: u32,
}

impl CombinedEstimate {
    pub fn from_parts(boxes: EstimateBoxesResult, time: EstimateTimeResult) -> Self {
        Self {
            counts: boxes.counts,
            total_rooms: boxes.total_rooms,
            pack_minutes: time.pack_minutes,
            unpack_minutes: time.unpack_minutes,
        }
    }
}
