/// `price * quantity`, or `None` when either side is missing.
pub fn derive_sales(price: Option<f64>, quantity: Option<i64>) -> Option<f64> {
    Some(price? * quantity? as f64)
}
