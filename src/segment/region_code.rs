use std::fmt;

/// Which side of every plane processed so far a segment fell on, one bit per plane in
/// processing order. `true` is the positive side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RegionCode(Vec<bool>);

impl RegionCode {
    /// The code of a segment no plane has touched yet.
    pub const fn new() -> Self {
        RegionCode(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Side recorded for plane `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// This code extended by one more plane.
    pub fn pushed(&self, positive: bool) -> Self {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(positive);
        RegionCode(bits)
    }
}

impl From<Vec<bool>> for RegionCode {
    fn from(bits: Vec<bool>) -> Self {
        RegionCode(bits)
    }
}

impl From<&[bool]> for RegionCode {
    fn from(bits: &[bool]) -> Self {
        RegionCode(bits.to_vec())
    }
}

/// `+` for every positive bit and `-` for every negative one, e.g. `+-+`.
impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "+" } else { "-" })?;
        }
        Ok(())
    }
}
