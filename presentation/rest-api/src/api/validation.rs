use poem::{Endpoint, Middleware, Request};
use poem_openapi::error::{ContentTypeError, ParseRequestPayloadError};
use serde_json::Value;

use business::domain::product::errors::ProductError;

use crate::api::error::ApiError;
use crate::api::product::dto::INVALID_PRODUCT_DATA;

const REQUIRED_FIELDS: [&str; 4] = ["name", "description", "price", "category"];
const IN_STOCK_FIELD: &str = "inStock";

/// Rejects create/update bodies that lack a product field before the
/// handler runs.
///
/// `name`, `description`, `price` and `category` must be truthy (not null,
/// `false`, `0` or `""`). `inStock` only has to be present: `false` is a valid
/// stock state. A body that passes but cannot be read as a product (wrong
/// field types, not JSON) is reported as invalid product data.
pub struct ValidateProduct;

impl<E: Endpoint> Middleware<E> for ValidateProduct {
    type Output = ValidateProductEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ValidateProductEndpoint { inner: ep }
    }
}

pub struct ValidateProductEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for ValidateProductEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> poem::Result<Self::Output> {
        let body = req.take_body().into_bytes().await?;
        check_required_fields(&body)?;
        req.set_body(body);
        self.inner.call(req).await.map_err(|err| {
            if err.is::<ParseRequestPayloadError>() || err.is::<ContentTypeError>() {
                ApiError::Validation(INVALID_PRODUCT_DATA.to_string()).into()
            } else {
                err
            }
        })
    }
}

/// Whole-body check; reports one generic message rather than per-field errors.
pub fn check_required_fields(body: &[u8]) -> Result<(), ApiError> {
    let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let fields_present = REQUIRED_FIELDS
        .iter()
        .all(|field| payload.get(field).is_some_and(is_truthy));
    let in_stock_present = payload
        .get(IN_STOCK_FIELD)
        .is_some_and(|value| !value.is_null());

    if fields_present && in_stock_present {
        Ok(())
    } else {
        Err(ApiError::Validation(ProductError::MISSING_FIELDS.to_string()))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
