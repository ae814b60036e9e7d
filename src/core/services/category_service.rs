use crate::wishlist::Wishlist;

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(wishlist: &mut Wishlist, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        if wishlist.categories.iter().any(|existing| existing == name) {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                name
            )));
        }
        wishlist.categories.push(name.to_string());
        Ok(())
    }

    /// Drops the category from the order. Goals keep their label and are shown under `Other`.
    pub fn remove(wishlist: &mut Wishlist, name: &str) -> ServiceResult<()> {
        let before = wishlist.categories.len();
        wishlist.categories.retain(|existing| existing != name.trim());
        if wishlist.categories.len() == before {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` not found",
                name
            )));
        }
        Ok(())
    }

    /// Moves the category at `from` to position `to` (0-based), shifting the others.
    pub fn move_to(wishlist: &mut Wishlist, from: usize, to: usize) -> ServiceResult<()> {
        let len = wishlist.categories.len();
        if from >= len || to >= len {
            return Err(ServiceError::Invalid(format!(
                "Category position out of range (1-{})",
                len
            )));
        }
        if from != to {
            let category = wishlist.categories.remove(from);
            wishlist.categories.insert(to, category);
        }
        Ok(())
    }

    pub fn list(wishlist: &Wishlist) -> &[String] {
        &wishlist.categories
    }
}
