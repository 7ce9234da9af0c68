//! Mode-parity markers used in output naming.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Te,
    Tm,
    ZEven,
    ZOdd,
    YEven,
    YOdd,
}

impl Parity {
    /// Filename suffix for this parity, if any.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Parity::None => None,
            Parity::Te => Some("te"),
            Parity::Tm => Some("tm"),
            Parity::ZEven => Some("zeven"),
            Parity::ZOdd => Some("zodd"),
            Parity::YEven => Some("yeven"),
            Parity::YOdd => Some("yodd"),
        }
    }
}
