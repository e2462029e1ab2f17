#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Four customers: two High Value, one Mid, one Low; all in the United Kingdom.
pub const FOUR_CUSTOMERS: &str = "\
customer_id,main_country,value_tier,ship_bucket,monetary_sales
1,United Kingdom,High Value,Reliable,1200.5
2,United Kingdom,High Value,Critical,800
3,United Kingdom,Mid Value,Reliable,300
4,United Kingdom,Low Value,Minor Issues,99.5
";

/// Mixed countries, a Mid Value customer without a shipping bucket and a blank sales cell.
pub const MIXED_CUSTOMERS: &str = "\
customer_id,main_country,value_tier,ship_bucket,monetary_sales
1,France,High Value,Reliable,1000
2,Germany,High Value,Unreliable,2000
3,France,Mid Value,,500
4,Germany,Low Value,Critical,
5,Germany,Low Value,Critical,50
";

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
