//! Cashier session passed explicitly to each teller screen

use super::models::Client;

const DEFAULT_CASHIER_NAME: &str = "Cajero";

/// Identity of the cashier operating the terminal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    cashier: Option<Client>,
}

impl Session {
    /// Session for a cashier returned by the login endpoint
    pub fn new(cashier: Client) -> Self {
        Self { cashier: Some(cashier) }
    }

    /// Session with no authenticated cashier
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn cashier(&self) -> Option<&Client> {
        self.cashier.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.cashier.is_some()
    }

    /// Full name, or "Cajero" when unknown
    pub fn display_name(&self) -> &str {
        self.cashier
            .as_ref()
            .map(|c| c.nombre_completo.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CASHIER_NAME)
    }

    /// First word of the display name, for greetings
    pub fn first_name(&self) -> &str {
        self.display_name()
            .split_whitespace()
            .next()
            .unwrap_or(DEFAULT_CASHIER_NAME)
    }

    /// Forget the cashier
    pub fn end(&mut self) {
        self.cashier = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cashier(name: &str) -> Client {
        Client {
            id_cliente: 12,
            nombre_completo: name.to_string(),
            identificacion: Some("0912345678".to_string()),
        }
    }

    #[test]
    fn test_anonymous_session_defaults() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), "Cajero");
        assert_eq!(session.first_name(), "Cajero");
    }

    #[test]
    fn test_first_name() {
        let session = Session::new(cashier("Carla Mendoza Ruiz"));
        assert_eq!(session.display_name(), "Carla Mendoza Ruiz");
        assert_eq!(session.first_name(), "Carla");
    }

    #[test]
    fn test_blank_name_falls_back() {
        let session = Session::new(cashier("   "));
        assert!(session.is_authenticated());
        assert_eq!(session.display_name(), "Cajero");
    }

    #[test]
    fn test_end_session() {
        let mut session = Session::new(cashier("Carla"));
        session.end();
        assert!(session.cashier().is_none());
    }
}
