//! Contact form: validation, the `mailto:` hand-off, and notifications.
//!
//! Nothing is sent from the page. A valid submission becomes a pre-filled
//! mail draft opened in the visitor's mail client; whether it is actually
//! sent is out of our hands.

use crate::config::{BusinessConfig, TimingConfig};
use crate::dom::Dom;
use crate::markup;
use crate::utils;
use thiserror::Error;

pub const FORM_ID: &str = "contactForm";
pub const NAME_ID: &str = "name";
pub const PHONE_ID: &str = "phone";
pub const EMAIL_ID: &str = "email";
pub const DEVICE_ID: &str = "deviceField";
pub const ISSUE_ID: &str = "issueField";
pub const MESSAGE_ID: &str = "message";

const NOTIFICATION_CLASS: &str = "form-notification";
const SUCCESS_MESSAGE: &str =
    "Opening your email app... Please send the message to complete your request.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone { digits: usize },
}

/// Raw form values, as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub device: String,
    pub issue: String,
    pub message: String,
}

/// A validated contact request. Values are trimmed; optional fields left
/// blank are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub device: String,
    pub issue: String,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Check required fields first, then the phone number. Only the first
    /// failure is reported.
    pub fn validate(fields: &ContactFields) -> Result<Self, ContactError> {
        let name = fields.name.trim();
        let phone = fields.phone.trim();
        let device = fields.device.trim();
        let issue = fields.issue.trim();

        let missing: Vec<&'static str> = [
            ("name", name),
            ("phone", phone),
            ("device", device),
            ("issue", issue),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        let digits = utils::phone_digits(phone).len();
        if digits != 10 {
            return Err(ContactError::InvalidPhone { digits });
        }

        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            email: optional(&fields.email),
            device: device.to_string(),
            issue: issue.to_string(),
            message: optional(&fields.message),
        })
    }

    pub fn subject(&self) -> String {
        format!("Repair Request - {} ({})", self.device, self.issue)
    }

    pub fn body(&self, submitted_at: &str) -> String {
        format!(
            "Name: {name}\n\
             Phone: {phone}\n\
             Email: {email}\n\
             Device: {device}\n\
             Issue: {issue}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             Submitted: {submitted_at}",
            name = self.name,
            phone = self.phone,
            email = self.email.as_deref().unwrap_or("Not provided"),
            device = self.device,
            issue = self.issue,
            message = self
                .message
                .as_deref()
                .unwrap_or("No additional details provided"),
        )
    }

    /// `mailto:` link with the subject and body pre-filled.
    pub fn mailto(&self, recipient: &str, submitted_at: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            utils::encode_uri_component(&self.subject()),
            utils::encode_uri_component(&self.body(submitted_at)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

pub struct ContactForm<D: Dom> {
    form: D::Node,
    phone: Option<D::Node>,
    recipient: String,
    timing: TimingConfig,
}

impl<D: Dom> ContactForm<D> {
    /// Bind to `#contactForm`. Individual fields are looked up on submit; a
    /// missing one reads as empty.
    pub fn init(dom: &D, business: &BusinessConfig, timing: &TimingConfig) -> Option<Self> {
        Some(Self {
            form: dom.element_by_id(FORM_ID)?,
            phone: dom.element_by_id(PHONE_ID),
            recipient: business.email.clone(),
            timing: timing.clone(),
        })
    }

    pub fn form(&self) -> &D::Node {
        &self.form
    }

    pub fn phone_input(&self) -> Option<&D::Node> {
        self.phone.as_ref()
    }

    pub fn collect(&self, dom: &D) -> ContactFields {
        let read = |id: &str| {
            dom.element_by_id(id)
                .map(|node| dom.value(&node))
                .unwrap_or_default()
        };
        ContactFields {
            name: read(NAME_ID),
            phone: read(PHONE_ID),
            email: read(EMAIL_ID),
            device: read(DEVICE_ID),
            issue: read(ISSUE_ID),
            message: read(MESSAGE_ID),
        }
    }

    /// Validate and hand the request to the mail client.
    ///
    /// Returns the `mailto:` URL that was opened. On a validation failure the
    /// form is left untouched apart from the error notification.
    pub fn submit(&self, dom: &D) -> Result<String, ContactError> {
        let submission = match ContactSubmission::validate(&self.collect(dom)) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(error = ?err, "contact form rejected");
                self.notify(dom, &err.to_string(), NotificationKind::Error);
                return Err(err);
            }
        };

        let url = submission.mailto(&self.recipient, &dom.local_timestamp());
        dom.open_url(&url);
        self.notify(dom, SUCCESS_MESSAGE, NotificationKind::Success);
        dom.reset_form(&self.form);
        tracing::info!(device = %submission.device, issue = %submission.issue, "opened mail draft");
        Ok(url)
    }

    /// Re-mask the phone field after each keystroke.
    pub fn on_phone_input(&self, dom: &D) {
        if let Some(phone) = &self.phone {
            let masked = utils::format_phone_input(&dom.value(phone));
            dom.set_value(phone, &masked);
        }
    }

    /// Show `message` at the top of the form, replacing any notification
    /// already shown, and schedule its dismissal.
    pub fn notify(&self, dom: &D, message: &str, kind: NotificationKind) -> Option<D::Node> {
        if let Some(existing) = dom.query_selector(&format!(".{NOTIFICATION_CLASS}")) {
            dom.remove(&existing);
        }

        let node = dom.create_element("div")?;
        dom.add_class(&node, NOTIFICATION_CLASS);
        dom.add_class(&node, kind.class());
        dom.set_text(&node, message);
        dom.set_attribute(&node, "style", &markup::notification_style(kind));
        dom.prepend(&self.form, &node);

        let fade_ms = self.timing.notification_fade_ms;
        let shown = node.clone();
        dom.set_timeout(
            self.timing.notification_ms,
            Box::new(move |dom: &D| {
                dom.set_style(&shown, "animation", "slideUp 0.3s ease-out forwards");
                dom.set_timeout(fade_ms, Box::new(move |dom: &D| dom.remove(&shown)));
            }),
        );
        Some(node)
    }
}
