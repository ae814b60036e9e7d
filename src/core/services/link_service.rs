use crate::wishlist::{ExternalLink, Wishlist};

use super::{ServiceError, ServiceResult};

pub struct LinkService;

impl LinkService {
    pub fn add(wishlist: &mut Wishlist, label: &str, url: &str) -> ServiceResult<String> {
        let label = label.trim();
        let url = url.trim();
        if label.is_empty() {
            return Err(ServiceError::Invalid("Link label cannot be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ServiceError::Invalid(
                "Link url must start with http:// or https://".into(),
            ));
        }
        let link = ExternalLink::new(label, url);
        let id = link.id.clone();
        wishlist.external_links.push(link);
        Ok(id)
    }

    /// Removes by 1-based position or id prefix.
    pub fn remove(wishlist: &mut Wishlist, token: &str) -> ServiceResult<ExternalLink> {
        let token = token.trim();
        let index = token
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .filter(|idx| *idx < wishlist.external_links.len())
            .or_else(|| {
                if token.is_empty() {
                    None
                } else {
                    wishlist
                        .external_links
                        .iter()
                        .position(|link| link.id.starts_with(token))
                }
            })
            .ok_or_else(|| ServiceError::Invalid(format!("Link `{}` not found", token)))?;
        Ok(wishlist.external_links.remove(index))
    }

    pub fn list(wishlist: &Wishlist) -> &[ExternalLink] {
        &wishlist.external_links
    }
}
