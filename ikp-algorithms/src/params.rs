use ikp_instance::{KnapsackError, KnapsackResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Base the weights are written in before digits are dropped. `1` solves
    /// exactly.
    pub modulo: u64,
    /// Digit positions to drop. The first one listed decides the rounding.
    pub exponents: Vec<u32>,
}

impl Default for Params {
    fn default() -> Self {
        Self::exact()
    }
}

impl Params {
    pub fn exact() -> Self {
        Self {
            modulo: 1,
            exponents: Vec::new(),
        }
    }

    pub fn initialize(h: &Option<Map<String, Value>>) -> KnapsackResult<Self> {
        let mut p = Self::exact();
        if let Some(m) = h {
            if let Some(v) = m.get("modulo") {
                p.modulo = v.as_u64().ok_or_else(|| {
                    KnapsackError::InvalidConfig(format!("modulo must be a positive integer, got {}", v))
                })?;
            }
            if let Some(v) = m.get("exponents") {
                p.exponents = v
                    .as_array()
                    .and_then(|arr| {
                        arr.iter()
                            .map(|e| e.as_u64().and_then(|e| u32::try_from(e).ok()))
                            .collect::<Option<Vec<u32>>>()
                    })
                    .ok_or_else(|| {
                        KnapsackError::InvalidConfig(format!(
                            "exponents must be a list of non-negative integers, got {}",
                            v
                        ))
                    })?;
            }
        }
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> KnapsackResult<()> {
        if self.modulo == 0 {
            return Err(KnapsackError::InvalidConfig(
                "modulo must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rounds(&self) -> bool {
        self.modulo > 1 && !self.exponents.is_empty()
    }
}
