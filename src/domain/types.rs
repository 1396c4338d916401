// ==========================================
// 搬家估算引擎 - 领域类型定义
// ==========================================
// 房屋类型 / 打包强度 / 房间类型 / 纸箱类型 / 服务类型
// 全部为封闭枚举,行为由查表决定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// ==========================================
// 纸箱类型 (Box Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxType {
    Small,       // 小箱
    Medium,      // 中箱
    Large,       // 大箱
    Wardrobe,    // 衣柜箱
    DishPack,    // 餐具箱
    MattressBag, // 床垫袋
    TvBox,       // 电视箱
}

impl BoxType {
    /// 全部纸箱类型（固定顺序,与 BoxCounts 字段顺序一致）
    pub const ALL: [BoxType; 7] = [
        BoxType::Small,
        BoxType::Medium,
        BoxType::Large,
        BoxType::Wardrobe,
        BoxType::DishPack,
        BoxType::MattressBag,
        BoxType::TvBox,
    ];

    /// 对外字段名（与 JSON 字段一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            BoxType::Small => "small",
            BoxType::Medium => "medium",
            BoxType::Large => "large",
            BoxType::Wardrobe => "wardrobe",
            BoxType::DishPack => "dishPack",
            BoxType::MattressBag => "mattressBag",
            BoxType::TvBox => "tvBox",
        }
    }

    /// 从字段名解析
    pub fn parse(s: &str) -> Option<Self> {
        BoxType::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

impl fmt::Display for BoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 房间类型 (Room Type)
// ==========================================
// 房间是纸箱累加的最小单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomType {
    Bedroom,       // 卧室
    LivingRoom,    // 客厅
    Kitchen,       // 厨房
    DiningRoom,    // 餐厅
    Garage,        // 车库
    Office,        // 书房
    PatioShed,     // 露台/棚屋
    AtticBasement, // 阁楼/地下室
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        RoomType::Bedroom,
        RoomType::LivingRoom,
        RoomType::Kitchen,
        RoomType::DiningRoom,
        RoomType::Garage,
        RoomType::Office,
        RoomType::PatioShed,
        RoomType::AtticBasement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::LivingRoom => "livingRoom",
            RoomType::Kitchen => "kitchen",
            RoomType::DiningRoom => "diningRoom",
            RoomType::Garage => "garage",
            RoomType::Office => "office",
            RoomType::PatioShed => "patioShed",
            RoomType::AtticBasement => "atticBasement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        RoomType::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 房屋类型 (Property Type)
// ==========================================
// 决定固定房间集合以及卧室数合法区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Apartment,  // 公寓
    NormalHome, // 普通住宅
    LargeHome,  // 大型住宅
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Apartment,
        PropertyType::NormalHome,
        PropertyType::LargeHome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::NormalHome => "normalHome",
            PropertyType::LargeHome => "largeHome",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PropertyType::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// 卧室数合法区间
    ///
    /// - 公寓允许 0 间卧室（开间）
    /// - 住宅至少按 1 间卧室计
    pub fn bedroom_range(&self) -> RangeInclusive<i32> {
        match self {
            PropertyType::Apartment => 0..=5,
            PropertyType::NormalHome | PropertyType::LargeHome => 1..=5,
        }
    }

    /// 将卧室数钳制到合法区间（不报错）
    pub fn clamp_bedrooms(&self, bedrooms: i32) -> u32 {
        let range = self.bedroom_range();
        bedrooms.clamp(*range.start(), *range.end()) as u32
    }

    /// 除卧室以外的固定房间集合（每种各 1 间）
    pub fn fixed_rooms(&self) -> &'static [RoomType] {
        match self {
            PropertyType::Apartment => &[RoomType::LivingRoom, RoomType::Kitchen],
            PropertyType::NormalHome => &[
                RoomType::LivingRoom,
                RoomType::Kitchen,
                RoomType::DiningRoom,
                RoomType::Garage,
            ],
            PropertyType::LargeHome => &[
                RoomType::LivingRoom,
                RoomType::Kitchen,
                RoomType::DiningRoom,
                RoomType::Garage,
                RoomType::Office,
                RoomType::PatioShed,
                RoomType::AtticBasement,
            ],
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 打包强度 (Packing Intensity)
// ==========================================
// 顺序: LessThanNormal < Normal < MoreThanNormal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackingIntensity {
    LessThanNormal, // 少于常规
    Normal,         // 常规
    MoreThanNormal, // 多于常规
}

impl PackingIntensity {
    pub const ALL: [PackingIntensity; 3] = [
        PackingIntensity::LessThanNormal,
        PackingIntensity::Normal,
        PackingIntensity::MoreThanNormal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackingIntensity::LessThanNormal => "lessThanNormal",
            PackingIntensity::Normal => "normal",
            PackingIntensity::MoreThanNormal => "moreThanNormal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PackingIntensity::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// 纸箱数量倍率
    pub fn multiplier(&self) -> f64 {
        match self {
            PackingIntensity::LessThanNormal => 0.75,
            PackingIntensity::Normal => 1.0,
            PackingIntensity::MoreThanNormal => 1.5,
        }
    }
}

impl fmt::Display for PackingIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 服务类型 (Service Type)
// ==========================================
// 仅影响工时: 只有 "White Glove" 生效,其余一律不加成
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    WhiteGlove,
    Other(String),
}

/// White Glove 服务标签（精确匹配）
pub const WHITE_GLOVE_LABEL: &str = "White Glove";

/// White Glove 工时倍率
pub const WHITE_GLOVE_MULTIPLIER: f64 = 1.2;

impl ServiceType {
    pub fn from_label(label: &str) -> Self {
        if label == WHITE_GLOVE_LABEL {
            ServiceType::WhiteGlove
        } else {
            ServiceType::Other(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ServiceType::WhiteGlove => WHITE_GLOVE_LABEL,
            ServiceType::Other(s) => s,
        }
    }

    /// 打包/拆包工时倍率
    pub fn time_multiplier(&self) -> f64 {
        match self {
            ServiceType::WhiteGlove => WHITE_GLOVE_MULTIPLIER,
            ServiceType::Other(_) => 1.0,
        }
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        ServiceType::from_label(&s)
    }
}

impl From<ServiceType> for String {
    fn from(s: ServiceType) -> Self {
        s.label().to_string()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
