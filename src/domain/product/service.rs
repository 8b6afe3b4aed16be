use super::aggregate::{validate_price, Product};
use super::errors::ProductError;

// ============================================================================
// Product Domain Service
// ============================================================================

pub struct ProductService;

impl ProductService {
    /// Change every price by `percentage` percent.
    ///
    /// All new prices are validated before any product is touched, so either
    /// every product changes or none does.
    pub fn increase_price(products: &mut [Product], percentage: f64) -> Result<(), ProductError> {
        if !percentage.is_finite() || percentage < -100.0 {
            return Err(ProductError::InvalidPercentage(percentage));
        }

        let factor = 1.0 + percentage / 100.0;
        let new_prices = products
            .iter()
            .map(|product| {
                let price = product.price() * factor;
                validate_price(price).map(|_| price)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (product, price) in products.iter_mut().zip(new_prices) {
            product.change_price(price)?;
        }

        tracing::debug!(
            product_count = products.len(),
            percentage = percentage,
            "Changed product prices"
        );

        Ok(())
    }
}
