//! # Email Templates
//!
//! Every storefront email shares one HTML layout: the store header, the
//! message body, and a footer with the copyright year and street address.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │         Bean & Brew          │  header
//! ├──────────────────────────────┤
//! │  <body of the message>       │  per-template content
//! ├──────────────────────────────┤
//! │  © 2026 Bean & Brew ...      │  footer
//! └──────────────────────────────┘
//! ```
//!
//! Customer-supplied text (names, subjects, messages) is HTML-escaped before
//! it is placed in a body.

use brew_core::{ContactForm, OrderRecord};
use chrono::{Datelike, NaiveDate};

use crate::message::EmailMessage;

/// Who the emails come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreIdentity {
    /// Display name used in headers and subjects.
    pub name: String,
    /// `From:` header value.
    pub sender: String,
    /// Address that receives contact form submissions.
    pub support_email: String,
    /// Public site URL, without a trailing slash.
    pub site_url: String,
    /// Street address printed in the footer.
    pub postal_address: String,
}

impl Default for StoreIdentity {
    fn default() -> Self {
        StoreIdentity {
            name: "Bean & Brew".to_string(),
            sender: "Bean & Brew <noreply@beanandbrew.com>".to_string(),
            support_email: "support@beanandbrew.com".to_string(),
            site_url: "https://beanandbrew.com".to_string(),
            postal_address: "123 Coffee Street, Portland, OR 97201".to_string(),
        }
    }
}

impl StoreIdentity {
    fn layout(&self, content: &str, today: NaiveDate) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ text-align: center; margin-bottom: 30px; }}
    .content {{ margin-bottom: 30px; }}
    .footer {{ text-align: center; font-size: 14px; color: #666; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1 style="color: #8B4513;">{name}</h1>
    </div>
    <div class="content">
      {content}
    </div>
    <div class="footer">
      <p>&copy; {year} {name} Coffee Co. All rights reserved.</p>
      <p>{address}</p>
    </div>
  </div>
</body>
</html>
"#,
            name = escape_html(&self.name),
            content = content,
            year = today.year(),
            address = escape_html(&self.postal_address),
        )
    }

    fn link(&self, path: &str, label: &str) -> String {
        format!(
            r#"<a href="{}{}" style="color: #8B4513;">{}</a>"#,
            self.site_url, path, label
        )
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// `Order Confirmation #INV-482913 - Bean & Brew` to the customer.
    pub fn order_confirmation(&self, to: &str, order: &OrderRecord) -> EmailMessage {
        let date = order.date.date_naive();
        let lines: String = order
            .items
            .iter()
            .map(|item| {
                format!(
                    "<li>{} &times; {} &mdash; {}</li>",
                    item.quantity,
                    escape_html(&item.product.name),
                    item.line_total()
                )
            })
            .collect();

        let content = format!(
            r#"<h2>Thank You for Your Order!</h2>
        <p>Your order ({id}) has been confirmed and is being processed.</p>
        <p>Order Details:</p>
        <ul>
          <li>Order Number: {id}</li>
          <li>Order Date: {date}</li>
        </ul>
        <ul>{lines}</ul>
        <p>Subtotal: {subtotal}<br>Tax: {tax}<br><strong>Total: {total}</strong></p>
        <p>We'll send you another email when your order ships.</p>
        <p>You can track your order status by visiting your account dashboard:</p>
        <p>{link}</p>"#,
            id = order.id,
            date = date.format("%-m/%-d/%Y"),
            lines = lines,
            subtotal = order.subtotal,
            tax = order.tax,
            total = order.total,
            link = self.link("/account/orders", "View Order Status"),
        );

        EmailMessage::new(
            &self.sender,
            to,
            format!("Order Confirmation #{} - {}", order.id, self.name),
            self.layout(&content, date),
        )
    }

    /// The submission relayed to support, replying to the customer.
    pub fn contact_to_support(&self, form: &ContactForm, today: NaiveDate) -> EmailMessage {
        let content = format!(
            r#"<h2>New Contact Form Submission</h2>
        <p><strong>From:</strong> {name} ({email})</p>
        <p><strong>Subject:</strong> {subject}</p>
        <p><strong>Message:</strong></p>
        <p>{message}</p>"#,
            name = escape_html(&form.name),
            email = escape_html(&form.email),
            subject = escape_html(&form.subject),
            message = escape_html(&form.message),
        );

        EmailMessage::new(
            &self.sender,
            &self.support_email,
            format!("Contact Form: {}", form.subject),
            self.layout(&content, today),
        )
        .reply_to(&form.email)
    }

    /// Acknowledgement sent back to whoever used the contact form.
    pub fn contact_confirmation(&self, form: &ContactForm, today: NaiveDate) -> EmailMessage {
        let content = format!(
            r#"<h2>We Got Your Message!</h2>
        <p>Dear {name},</p>
        <p>Thank you for contacting {store}. We've received your message and will get back to you within 24-48 hours.</p>
        <p><strong>Your message details:</strong></p>
        <p>Subject: {subject}</p>
        <p>Message: {message}</p>"#,
            name = escape_html(&form.name),
            store = escape_html(&self.name),
            subject = escape_html(&form.subject),
            message = escape_html(&form.message),
        );

        EmailMessage::new(
            &self.sender,
            &form.email,
            format!("We received your message - {}", self.name),
            self.layout(&content, today),
        )
    }

    /// Welcome email for a new newsletter subscriber, with the WELCOME10 code.
    pub fn newsletter_confirmation(&self, to: &str, today: NaiveDate) -> EmailMessage {
        let content = format!(
            r#"<h2>Welcome to Our Newsletter!</h2>
        <p>Thank you for subscribing to the {store} newsletter.</p>
        <p>You'll now receive:</p>
        <ul>
          <li>New product announcements</li>
          <li>Exclusive discounts</li>
          <li>Brewing tips and recipes</li>
          <li>Coffee origin stories</li>
        </ul>
        <p>As a welcome gift, enjoy 10% off your next purchase with code: <strong>WELCOME10</strong></p>
        <p>{link}</p>"#,
            store = escape_html(&self.name),
            link = self.link("/products", "Shop Now"),
        );

        EmailMessage::new(
            &self.sender,
            to,
            format!("Welcome to {} Newsletter!", self.name),
            self.layout(&content, today),
        )
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{Cart, Money, OrderId, PaymentMethod, Product, ShippingAddress, ValidCheckout};
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn order() -> OrderRecord {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "Ethiopian Yirgacheffe", Money::from_cents(1899), "coffee"), 2);
        let checkout = ValidCheckout {
            email: "ada@example.com".to_string(),
            shipping_address: ShippingAddress {
                name: "Ada Lovelace".to_string(),
                address: "12 Roast Lane".to_string(),
                city: "Portland".to_string(),
                state: "OR".to_string(),
                zip_code: "97201".to_string(),
                country: "USA".to_string(),
            },
            payment_method: PaymentMethod::Paypal,
        };
        let id: OrderId = serde_json::from_str("\"INV-482913\"").unwrap();
        let date = Utc.with_ymd_and_hms(2026, 10, 17, 14, 2, 11).unwrap();
        OrderRecord::from_cart(id, date, &cart, &checkout).unwrap()
    }

    fn contact() -> ContactForm {
        ContactForm {
            name: "Jo <script>".to_string(),
            email: "jo@example.com".to_string(),
            subject: "Beans & more".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn test_order_confirmation() {
        let store = StoreIdentity::default();
        let message = store.order_confirmation("ada@example.com", &order());

        assert_eq!(message.subject, "Order Confirmation #INV-482913 - Bean & Brew");
        assert_eq!(message.from, "Bean & Brew <noreply@beanandbrew.com>");
        assert_eq!(message.to, "ada@example.com");
        assert!(message.html.contains("Order Date: 10/17/2026"));
        assert!(message.html.contains("Total: $41.02"));
        assert!(message.html.contains("https://beanandbrew.com/account/orders"));
        assert!(message.html.contains("&copy; 2026"));
    }

    #[test]
    fn test_contact_to_support_replies_to_customer() {
        let message = StoreIdentity::default().contact_to_support(&contact(), today());

        assert_eq!(message.to, "support@beanandbrew.com");
        assert_eq!(message.reply_to.as_deref(), Some("jo@example.com"));
        assert_eq!(message.subject, "Contact Form: Beans & more");
        assert!(message.html.contains("Jo &lt;script&gt;"));
        assert!(!message.html.contains("<script>"));
    }

    #[test]
    fn test_contact_confirmation() {
        let message = StoreIdentity::default().contact_confirmation(&contact(), today());
        assert_eq!(message.to, "jo@example.com");
        assert_eq!(message.subject, "We received your message - Bean & Brew");
        assert!(message.reply_to.is_none());
    }

    #[test]
    fn test_newsletter_confirmation() {
        let message = StoreIdentity::default().newsletter_confirmation("jo@example.com", today());
        assert_eq!(message.subject, "Welcome to Bean & Brew Newsletter!");
        assert!(message.html.contains("WELCOME10"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
