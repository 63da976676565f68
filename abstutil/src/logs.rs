use std::fmt::Display;

// - If a computation can partly fail without invalidating the rest of its result, return
//   Warn<T, W> and let the caller decide what to do with the problems.
// - If the caller doesn't care, use unwrap(), which logs every warning.
// - If the caller wants to report problems itself, use into_parts().
/// A value plus the non-fatal problems encountered while producing it.
#[derive(Debug)]
pub struct Warn<T, W = String> {
    value: T,
    warnings: Vec<W>,
}

impl<T, W> Warn<T, W> {
    pub fn warnings(value: T, warnings: Vec<W>) -> Warn<T, W> {
        Warn { value, warnings }
    }

    pub fn into_parts(self) -> (T, Vec<W>) {
        (self.value, self.warnings)
    }
}

impl<T, W: Display> Warn<T, W> {
    /// Logs every warning and returns the value.
    pub fn unwrap(self) -> T {
        if !self.warnings.is_empty() {
            log::warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                log::warn!("{}", line);
            }
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_parts_keeps_every_warning() {
        let w: Warn<usize> = Warn::warnings(6, vec!["bad point".to_string(), "bad line".to_string()]);
        let (value, warnings) = w.into_parts();
        assert_eq!(value, 6);
        assert_eq!(warnings, vec!["bad point".to_string(), "bad line".to_string()]);
    }

    #[test]
    fn unwrap_without_warnings() {
        let w: Warn<&str> = Warn::warnings("fine", Vec::new());
        assert_eq!(w.unwrap(), "fine");
    }
}
