//! Nice IDCI output formatting.

use std::fmt;

use log;

const IDCI_BANNER_LENGTH: usize = 79;

/// Logs a warning to the `idci-output` logger.
macro_rules! idci_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::warn!($fmt, $($($arg)*)?);
        log::warn!(target: "idci-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `idci-output` logger.
macro_rules! idci_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "idci-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {idci_output, idci_warn};

/// Logs a nicely formatted section title to the `idci-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(IDCI_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    idci_output!("┌──{bar}──┐");
    idci_output!("│§ {title:^length$} §│");
    idci_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `idci-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    idci_output!("{}", subtitle);
    idci_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging IDCI outputs nicely.
pub(crate) trait IdciOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            idci_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> IdciOutput for T where T: fmt::Debug + fmt::Display {}
