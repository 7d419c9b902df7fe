use anyhow::Result;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::error;

use domain::{
    repositories::payment_gateway::PaymentGateway,
    value_objects::payments::{GatewayOrder, GatewayRefund},
};

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

/// Minimal Razorpay client built on reqwest.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayRefundResponse {
    id: String,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorDetails,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetails {
    code: Option<String>,
    description: Option<String>,
    reason: Option<String>,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self::with_base_url(key_id, key_secret, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(key_id: String, key_secret: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id,
            key_secret,
            base_url,
        }
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();

        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (error_code, error_description, error_reason) =
            match serde_json::from_str::<RazorpayErrorEnvelope>(&body) {
                Ok(envelope) => (
                    envelope.error.code,
                    envelope.error.description,
                    envelope.error.reason,
                ),
                Err(_) => (None, None, None),
            };

        error!(
            status = %status,
            razorpay_error_code = ?error_code,
            razorpay_error_description = ?error_description,
            razorpay_error_reason = ?error_reason,
            response_body = %body,
            context = %context,
            "razorpay api request failed"
        );

        anyhow::bail!(
            "Razorpay API request failed: {} (status {})",
            context,
            status
        );
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    /// Creates a gateway-side order ahead of client checkout.
    /// https://razorpay.com/docs/api/orders
    async fn create_order(
        &self,
        amount_minor: i32,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder> {
        let body = serde_json::json!({
            "amount": amount_minor,
            "currency": currency,
            "receipt": receipt,
        });

        let resp = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "create order").await?;

        let parsed: RazorpayOrderResponse = resp.json().await?;

        Ok(GatewayOrder {
            provider_order_id: parsed.id,
            amount_minor: parsed.amount.try_into()?,
            currency: parsed.currency,
        })
    }

    /// Verifies the checkout callback signature:
    /// HMAC-SHA256 over `"{order_id}|{payment_id}"` with the key secret.
    /// https://razorpay.com/docs/payments/payment-gateway/web-integration/standard/build-integration
    fn verify_checkout_signature(
        &self,
        provider_order_id: &str,
        provider_payment_id: &str,
        signature: &str,
    ) -> Result<()> {
        let signed_payload = format!("{}|{}", provider_order_id, provider_payment_id);

        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())?;
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();
        let provided = hex::decode(signature)?;

        if expected[..] != provided[..] {
            anyhow::bail!("invalid checkout signature");
        }

        Ok(())
    }

    /// https://razorpay.com/docs/api/refunds
    async fn refund(
        &self,
        provider_payment_ref: &str,
        amount_minor: i32,
    ) -> Result<GatewayRefund> {
        let body = serde_json::json!({ "amount": amount_minor });

        let resp = self
            .http
            .post(format!(
                "{}/v1/payments/{}/refund",
                self.base_url, provider_payment_ref
            ))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "refund payment").await?;

        let parsed: RazorpayRefundResponse = resp.json().await?;

        Ok(GatewayRefund {
            provider_refund_id: parsed.id,
            amount_minor: parsed.amount.try_into()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_a_valid_signature() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret123".to_string());
        let signature = sign("secret123", "order_abc", "pay_xyz");

        assert!(
            client
                .verify_checkout_signature("order_abc", "pay_xyz", &signature)
                .is_ok()
        );
    }

    #[test]
    fn rejects_a_signature_made_with_another_secret() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret123".to_string());
        let signature = sign("wrong-secret", "order_abc", "pay_xyz");

        assert!(
            client
                .verify_checkout_signature("order_abc", "pay_xyz", &signature)
                .is_err()
        );
    }

    #[test]
    fn rejects_a_signature_for_another_payment() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret123".to_string());
        let signature = sign("secret123", "order_abc", "pay_other");

        assert!(
            client
                .verify_checkout_signature("order_abc", "pay_xyz", &signature)
                .is_err()
        );
    }

    #[test]
    fn rejects_garbage_that_is_not_hex() {
        let client = RazorpayClient::new("rzp_test_key".to_string(), "secret123".to_string());

        assert!(
            client
                .verify_checkout_signature("order_abc", "pay_xyz", "not-hex!!")
                .is_err()
        );
    }
}
