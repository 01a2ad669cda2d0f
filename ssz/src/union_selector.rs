use crate::*;

/// A union selector that has been checked against `MAX_UNION_SELECTOR`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnionSelector(u8);

impl From<UnionSelector> for u8 {
    fn from(union_selector: UnionSelector) -> u8 {
        union_selector.0
    }
}

impl UnionSelector {
    /// Instantiates `self`, returning an error if `selector > MAX_UNION_SELECTOR`.
    pub fn new(selector: u8) -> Result<Self, DecodeError> {
        if selector <= MAX_UNION_SELECTOR {
            Ok(Self(selector))
        } else {
            Err(DecodeError::UnionSelectorInvalid(selector))
        }
    }
}
