//! List trait for cursor-chained collections.

use async_trait::async_trait;

use crate::client::OtxClient;
use crate::error::Result;
use crate::pagination::{ListOptions, PageEnvelope};

/// List entities from an endpoint that links each page to the next.
///
/// The server is authoritative for paging: `list_all` never counts pages
/// itself, it follows whatever `next` link the previous page returned.
///
/// # Example
///
/// ```ignore
/// use otxapi::{OtxClient, Pulse, List, ListOptions};
///
/// let client = OtxClient::from_env()?;
///
/// // Fetch a single page
/// let page = Pulse::list_page(&client, &ListOptions::for_page(1, 20)).await?;
///
/// // Fetch all pages
/// let all_pulses = Pulse::list_all(&client, &ListOptions::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Fetch a single page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(client: &OtxClient, opts: &ListOptions) -> Result<PageEnvelope<Self>>;

    /// Fetch every page, starting at page 1.
    ///
    /// Items are returned in page order. Iteration ends when a page has no
    /// `next` link.
    ///
    /// # Errors
    ///
    /// Returns the first error from any page request or page link, without
    /// retrying.
    async fn list_all(client: &OtxClient, opts: &ListOptions) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut opts = opts.clone().with_page(1);
        let mut pages = 0u32;

        loop {
            let envelope = Self::list_page(client, &opts).await?;
            pages += 1;
            let next = envelope.next_page_options();
            all_items.extend(envelope.items);

            match next {
                Ok(next) => {
                    tracing::debug!(page = ?next.page, "following next page link");
                    opts = next;
                }
                Err(e) if e.is_no_page() => break,
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(pages, items = all_items.len(), "listing complete");
        Ok(all_items)
    }
}
