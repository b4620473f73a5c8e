use std::str::FromStr;

use crate::prelude::*;

pub fn positive_f64(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value.is_finite() && value > 0.0 => Ok(value),
        value => Err(anyhow!("{} is not a positive number", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_f64_ok() -> crate::Result {
        assert!((positive_f64("583.3")? - 583.3).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn positive_f64_rejects() {
        assert!(positive_f64("0").is_err());
        assert!(positive_f64("-1").is_err());
        assert!(positive_f64("inf").is_err());
        assert!(positive_f64("NaN").is_err());
        assert!(positive_f64("many").is_err());
    }
}
