//! Domain Models & Configuration

use serde::{Deserialize, Serialize};

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub description: String,
    pub brand: String,
    pub price: f64,
}

/// Product write request body, as received on the wire
#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub description: String,
    pub brand: String,
    pub price: f64,
}

impl ProductBody {
    /// Validate into fields ready for the store. Text fields must be
    /// non-empty after trimming; price must be a non-negative finite number.
    pub fn validate(self) -> Result<NewProduct, String> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err("description must not be empty".to_string());
        }

        let brand = self.brand.trim().to_string();
        if brand.is_empty() {
            return Err("brand must not be empty".to_string());
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }

        Ok(NewProduct {
            description,
            brand,
            price: self.price,
        })
    }
}

/// Validated product fields, the only shape the store accepts
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub description: String,
    pub brand: String,
    pub price: f64,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub jwt_secret: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./catalogo.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            "dev-secret-change-in-production-minimum-32-characters".to_string()
        });

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Ok(Self {
            database_path,
            jwt_secret,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(description: &str, brand: &str, price: f64) -> ProductBody {
        ProductBody {
            description: description.to_string(),
            brand: brand.to_string(),
            price,
        }
    }

    #[test]
    fn test_valid_body_passes() {
        let new = body("Widget", "Acme", 9.99).validate().unwrap();
        assert_eq!(new.description, "Widget");
        assert_eq!(new.brand, "Acme");
        assert_eq!(new.price, 9.99);
    }

    #[test]
    fn test_text_fields_trimmed() {
        let new = body("  Widget  ", " Acme ", 0.0).validate().unwrap();
        assert_eq!(new.description, "Widget");
        assert_eq!(new.brand, "Acme");
    }

    #[test]
    fn test_empty_description_rejected() {
        assert!(body("", "Acme", 9.99).validate().is_err());
        assert!(body("   ", "Acme", 9.99).validate().is_err());
    }

    #[test]
    fn test_empty_brand_rejected() {
        assert!(body("Widget", "", 9.99).validate().is_err());
    }

    #[test]
    fn test_bad_price_rejected() {
        assert!(body("Widget", "Acme", -0.01).validate().is_err());
        assert!(body("Widget", "Acme", f64::NAN).validate().is_err());
        assert!(body("Widget", "Acme", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_zero_price_allowed() {
        assert!(body("Widget", "Acme", 0.0).validate().is_ok());
    }
}
