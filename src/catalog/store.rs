//! Product Storage
//! Mission: Store and manage catalog products with SQLite

use crate::models::{NewProduct, Product};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::info;

/// Product storage with SQLite backend
pub struct ProductStore {
    db_path: String,
}

impl ProductStore {
    /// Create a new product store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                brand TEXT NOT NULL,
                price REAL NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// List all products. An empty catalog yields an empty vec, not an error.
    pub fn list(&self) -> Result<Vec<Product>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt =
            conn.prepare("SELECT id, description, brand, price FROM products ORDER BY id")?;

        let products = stmt
            .query_map([], Self::map_product_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Get a product by id
    pub fn get(&self, id: i64) -> Result<Option<Product>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt =
            conn.prepare("SELECT id, description, brand, price FROM products WHERE id = ?1")?;

        let product_result = stmt.query_row(params![id], Self::map_product_row);

        match product_result {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a product and return the assigned id
    pub fn insert(&self, new: &NewProduct) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO products (description, brand, price) VALUES (?1, ?2, ?3)",
            params![new.description, new.brand, new.price],
        )
        .context("Failed to insert product")?;

        let id = conn.last_insert_rowid();
        info!("✅ Created product {} ({})", id, new.description);

        Ok(id)
    }

    /// Update a product in place. Returns false when no row matched the id.
    pub fn update(&self, id: i64, new: &NewProduct) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn
            .execute(
                "UPDATE products SET description = ?1, brand = ?2, price = ?3 WHERE id = ?4",
                params![new.description, new.brand, new.price, id],
            )
            .context("Failed to update product")?;

        Ok(rows_affected != 0)
    }

    /// Delete a product by id. Returns false when no row matched the id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn
            .execute("DELETE FROM products WHERE id = ?1", params![id])
            .context("Failed to delete product")?;

        Ok(rows_affected != 0)
    }

    fn map_product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get(0)?,
            description: row.get(1)?,
            brand: row.get(2)?,
            price: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ProductStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = ProductStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn widget() -> NewProduct {
        NewProduct {
            description: "Widget".to_string(),
            brand: "Acme".to_string(),
            price: 9.99,
        }
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let (store, _temp) = create_test_store();

        let id = store.insert(&widget()).unwrap();
        assert!(id > 0);

        let product = store.get(id).unwrap().unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.description, "Widget");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.price, 9.99);
    }

    #[test]
    fn test_list_empty_then_populated() {
        let (store, _temp) = create_test_store();

        assert!(store.list().unwrap().is_empty());

        store.insert(&widget()).unwrap();
        store
            .insert(&NewProduct {
                description: "Gadget".to_string(),
                brand: "Globex".to_string(),
                price: 19.99,
            })
            .unwrap();

        let products = store.list().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].description, "Widget");
        assert_eq!(products[1].description, "Gadget");
    }

    #[test]
    fn test_get_missing_is_none() {
        let (store, _temp) = create_test_store();
        assert!(store.get(999999).unwrap().is_none());
    }

    #[test]
    fn test_update_existing_and_missing() {
        let (store, _temp) = create_test_store();

        let id = store.insert(&widget()).unwrap();

        let changed = NewProduct {
            description: "Widget v2".to_string(),
            brand: "Acme".to_string(),
            price: 12.50,
        };
        assert!(store.update(id, &changed).unwrap());

        let product = store.get(id).unwrap().unwrap();
        assert_eq!(product.description, "Widget v2");
        assert_eq!(product.price, 12.50);

        // Zero affected rows is a distinct outcome, not an error
        assert!(!store.update(999999, &changed).unwrap());
    }

    #[test]
    fn test_delete_twice() {
        let (store, _temp) = create_test_store();

        let id = store.insert(&widget()).unwrap();

        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.get(id).unwrap().is_none());
    }
}
