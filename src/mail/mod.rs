//! Settlement digest composition and delivery.
//!
//! Composes the fixed-template monthly summary message and packages the
//! generated documents for delivery. The actual SMTP transport is an
//! external collaborator behind [`MailTransport`]; this module decides
//! whether to attempt a send (credentials present) and reports the outcome.
//! A failed send is reported, never retried.

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::core::{JeongsanError, Period, format_krw};

/// One generated document, held in memory until the run completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), bytes }
    }
}

/// A composed message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

/// Single-shot outbound delivery. Implementations must not retry.
pub trait MailTransport {
    fn send(&self, message: &OutboundMessage) -> Result<(), JeongsanError>;
}

/// Sender/recipient addresses and the single credential. A missing password
/// turns the notification step into a configuration no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailerConfig {
    pub from: String,
    pub to: String,
    pub password: Option<String>,
}

impl MailerConfig {
    /// Read `EMAIL_FROM`, `EMAIL_TO`, and `EMAIL_PASSWORD` from the
    /// environment. Surrounding whitespace is stripped; an empty password
    /// counts as absent.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name).map(|v| v.trim().to_string()).unwrap_or_default()
        };
        let password = var("EMAIL_PASSWORD");
        Self {
            from: var("EMAIL_FROM"),
            to: var("EMAIL_TO"),
            password: (!password.is_empty()).then_some(password),
        }
    }
}

/// Compose the fixed digest template: subject and plain-text body with the
/// period, grand total, business count, and attachment manifest.
pub fn compose_digest(
    supplier_name: &str,
    period: Period,
    business_count: usize,
    grand_total: i64,
) -> (String, String) {
    let subject = format!(
        "[{supplier_name}] {} 세탁물 정산 - 세금계산서 발행 요청",
        period.label()
    );
    let body = format!(
        "안녕하세요, {} 세탁물 정산 내역입니다.\n\
         \n\
         총 금액: {}\n\
         사업자 수: {business_count}개\n\
         \n\
         첨부파일:\n\
         - 사업자별 거래명세서 PDF ({business_count}개)\n\
         - 홈택스 세금계산서 시트 (1개)\n\
         \n\
         홈택스에서 세금계산서 발행 후 회신 부탁드립니다.\n\
         \n\
         감사합니다.\n",
        period.label(),
        format_krw(grand_total),
    );
    (subject, body)
}

/// Compose the digest and attempt delivery once.
///
/// Returns `true` only when the transport accepted the message. A missing
/// credential skips the transport entirely and returns `false`; a transport
/// failure is logged and returns `false`. Neither outcome affects the
/// already generated documents.
pub fn notify(
    config: &MailerConfig,
    transport: &dyn MailTransport,
    supplier_name: &str,
    period: Period,
    business_count: usize,
    grand_total: i64,
    attachments: Vec<Attachment>,
) -> bool {
    if config.password.is_none() {
        info!("EMAIL_PASSWORD not set, skipping mail delivery");
        return false;
    }

    let (subject, body) = compose_digest(supplier_name, period, business_count, grand_total);
    let message = OutboundMessage {
        from: config.from.clone(),
        to: config.to.clone(),
        subject,
        body,
        attachments,
    };

    match transport.send(&message) {
        Ok(()) => {
            info!("settlement digest sent to {}", message.to);
            true
        }
        Err(e) => {
            error!("mail delivery failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingTransport {
        calls: Cell<usize>,
        fail: bool,
    }

    impl MailTransport for CountingTransport {
        fn send(&self, _message: &OutboundMessage) -> Result<(), JeongsanError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(JeongsanError::Transport("smtp refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn period() -> Period {
        Period::new(2026, 7).unwrap()
    }

    #[test]
    fn digest_template() {
        let (subject, body) = compose_digest("캐리", period(), 3, 1_234_500);
        assert_eq!(subject, "[캐리] 2026년 7월 세탁물 정산 - 세금계산서 발행 요청");
        assert!(body.contains("총 금액: 1,234,500원"));
        assert!(body.contains("사업자 수: 3개"));
        assert!(body.contains("거래명세서 PDF (3개)"));
    }

    #[test]
    fn missing_credential_skips_transport() {
        let transport = CountingTransport { calls: Cell::new(0), fail: false };
        let config = MailerConfig {
            from: "a@example.com".into(),
            to: "b@example.com".into(),
            password: None,
        };
        assert!(!notify(&config, &transport, "캐리", period(), 1, 0, Vec::new()));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn transport_failure_reports_false_once() {
        let transport = CountingTransport { calls: Cell::new(0), fail: true };
        let config = MailerConfig {
            from: "a@example.com".into(),
            to: "b@example.com".into(),
            password: Some("secret".into()),
        };
        assert!(!notify(&config, &transport, "캐리", period(), 1, 0, Vec::new()));
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn successful_send_reports_true() {
        let transport = CountingTransport { calls: Cell::new(0), fail: false };
        let config = MailerConfig {
            from: "a@example.com".into(),
            to: "b@example.com".into(),
            password: Some("secret".into()),
        };
        assert!(notify(&config, &transport, "캐리", period(), 1, 37_500, Vec::new()));
        assert_eq!(transport.calls.get(), 1);
    }
}
