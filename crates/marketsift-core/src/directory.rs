//! Fixed reference directory of well-known A-share codes.
//!
//! Snapshot wire formats do not carry industry classification, and the
//! synthetic generator needs a plausible universe to fabricate from, so both
//! resolve names and industries against this table. Codes outside the table
//! classify as [`Industry::Other`].

use crate::{Industry, Symbol, ValidationError};

struct DirectoryEntry {
    code: &'static str,
    name: &'static str,
    industry: Industry,
}

const DIRECTORY: &[DirectoryEntry] = &[
    // Banking
    entry("000001", "平安银行", Industry::Banking),
    entry("600036", "招商银行", Industry::Banking),
    entry("600000", "浦发银行", Industry::Banking),
    entry("601318", "中国平安", Industry::Banking),
    entry("601398", "工商银行", Industry::Banking),
    entry("601328", "交通银行", Industry::Banking),
    // Baijiu
    entry("600519", "贵州茅台", Industry::Baijiu),
    entry("000858", "五粮液", Industry::Baijiu),
    entry("002304", "洋河股份", Industry::Baijiu),
    entry("000596", "古井贡酒", Industry::Baijiu),
    entry("600809", "山西汾酒", Industry::Baijiu),
    // Technology
    entry("002415", "海康威视", Industry::Technology),
    entry("300059", "东方财富", Industry::Technology),
    entry("300033", "同花顺", Industry::Technology),
    entry("002594", "比亚迪", Industry::Technology),
    entry("600570", "恒生电子", Industry::Technology),
    entry("600703", "三安光电", Industry::Technology),
    // Pharmaceutical
    entry("600276", "恒瑞医药", Industry::Pharmaceutical),
    entry("000661", "长春高新", Industry::Pharmaceutical),
    entry("002821", "凯莱英", Industry::Pharmaceutical),
    entry("300015", "爱尔眼科", Industry::Pharmaceutical),
    entry("300122", "智飞生物", Industry::Pharmaceutical),
    entry("600436", "片仔癀", Industry::Pharmaceutical),
    // Consumer
    entry("600887", "伊利股份", Industry::Consumer),
    entry("600298", "安琪酵母", Industry::Consumer),
    entry("000895", "双汇发展", Industry::Consumer),
    entry("002568", "百润股份", Industry::Consumer),
    entry("600690", "海尔智家", Industry::Consumer),
    // New energy
    entry("300750", "宁德时代", Industry::NewEnergy),
    entry("002460", "赣锋锂业", Industry::NewEnergy),
    entry("300274", "阳光电源", Industry::NewEnergy),
    entry("601012", "隆基绿能", Industry::NewEnergy),
    entry("002129", "中环股份", Industry::NewEnergy),
    // Real estate
    entry("000002", "万科A", Industry::RealEstate),
    entry("001979", "招商蛇口", Industry::RealEstate),
    entry("600048", "保利发展", Industry::RealEstate),
    entry("000069", "华侨城A", Industry::RealEstate),
    // Brokerage
    entry("600030", "中信证券", Industry::Brokerage),
    entry("000166", "申万宏源", Industry::Brokerage),
    entry("002736", "国信证券", Industry::Brokerage),
    entry("600999", "招商证券", Industry::Brokerage),
    entry("000776", "广发证券", Industry::Brokerage),
];

const fn entry(code: &'static str, name: &'static str, industry: Industry) -> DirectoryEntry {
    DirectoryEntry {
        code,
        name,
        industry,
    }
}

fn find(code: &str) -> Option<&'static DirectoryEntry> {
    DIRECTORY.iter().find(|candidate| candidate.code == code)
}

/// Industry classification for a symbol.
pub fn classify(symbol: &Symbol) -> Industry {
    find(symbol.code())
        .map(|entry| entry.industry)
        .unwrap_or(Industry::Other)
}

/// Display name for a symbol. Unknown codes get a placeholder name so the
/// record shape stays complete.
pub fn display_name(symbol: &Symbol) -> String {
    match find(symbol.code()) {
        Some(entry) => entry.name.to_owned(),
        None => format!("股票{}", symbol.code()),
    }
}

/// The default acquisition universe, in directory order.
pub fn default_universe() -> Vec<Symbol> {
    DIRECTORY
        .iter()
        .map(|entry| Symbol::parse(entry.code))
        .collect::<Result<Vec<_>, ValidationError>>()
        .expect("directory codes are valid symbols")
}
