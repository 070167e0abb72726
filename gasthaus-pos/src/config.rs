//! Service configuration
//!
//! All settings come from environment variables with sensible defaults.
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | BAR_PRINTER_IP | 192.168.178.126 | Counter printer |
//! | KITCHEN_PRINTER_IP | 192.168.178.126 | Kitchen printer |
//! | PRINTER_PORT | 9100 | Raw TCP print port |
//! | PRINTER_TIMEOUT_MS | 1500 | Connect timeout |
//! | PAPER_WIDTH | 42 | Characters per ticket line |
//! | PRINT_MODE | paged | `escpos` or `paged` |
//! | ROOMS | (house list) | Comma-separated room names |

/// Where receipts go: raw ESC/POS over TCP, or the paged document handed
/// to the platform print spooler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    EscPosTcp,
    Paged,
}

impl PrintMode {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "escpos" | "escpos_tcp" | "tcp" => Self::EscPosTcp,
            _ => Self::Paged,
        }
    }
}

/// POS configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bar_printer_ip: String,
    pub kitchen_printer_ip: String,
    pub printer_port: u16,
    pub printer_timeout_ms: u64,
    /// Characters per line on the thermal paper (42 on 80mm)
    pub paper_width: usize,
    pub print_mode: PrintMode,
    /// Room names in house order
    pub rooms: Vec<String>,
}

const DEFAULT_ROOMS: [&str; 5] = [
    "Restaurant",
    "Gewölbe",
    "Scheune EG",
    "Scheune UG",
    "Terrasse",
];

impl Config {
    /// Load from environment variables, using defaults where unset
    pub fn from_env() -> Self {
        Self {
            bar_printer_ip: std::env::var("BAR_PRINTER_IP")
                .unwrap_or_else(|_| "192.168.178.126".into()),
            kitchen_printer_ip: std::env::var("KITCHEN_PRINTER_IP")
                .unwrap_or_else(|_| "192.168.178.126".into()),
            printer_port: std::env::var("PRINTER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9100),
            printer_timeout_ms: std::env::var("PRINTER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1500),
            paper_width: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(42),
            print_mode: std::env::var("PRINT_MODE")
                .map(|v| PrintMode::from_env_value(&v))
                .unwrap_or(PrintMode::Paged),
            rooms: std::env::var("ROOMS")
                .map(|v| {
                    v.split(',')
                        .map(|r| r.trim().to_string())
                        .filter(|r| !r.is_empty())
                        .collect()
                })
                .unwrap_or_else(|_| DEFAULT_ROOMS.iter().map(|r| r.to_string()).collect()),
        }
    }

    /// Override the print targets, typically in tests
    pub fn with_overrides(
        bar_printer_ip: impl Into<String>,
        kitchen_printer_ip: impl Into<String>,
        print_mode: PrintMode,
    ) -> Self {
        let mut config = Self::from_env();
        config.bar_printer_ip = bar_printer_ip.into();
        config.kitchen_printer_ip = kitchen_printer_ip.into();
        config.print_mode = print_mode;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_mode_parsing() {
        assert_eq!(PrintMode::from_env_value("escpos"), PrintMode::EscPosTcp);
        assert_eq!(PrintMode::from_env_value("ESCPOS_TCP"), PrintMode::EscPosTcp);
        assert_eq!(PrintMode::from_env_value("paged"), PrintMode::Paged);
        assert_eq!(PrintMode::from_env_value("anything"), PrintMode::Paged);
    }

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides("10.0.0.1", "10.0.0.2", PrintMode::EscPosTcp);
        assert_eq!(config.bar_printer_ip, "10.0.0.1");
        assert_eq!(config.kitchen_printer_ip, "10.0.0.2");
        assert_eq!(config.print_mode, PrintMode::EscPosTcp);
    }
}
