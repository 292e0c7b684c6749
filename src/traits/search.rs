//! Search trait for count-bounded collections.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::OtxClient;
use crate::error::Result;
use crate::pagination::{total_pages, ListOptions, PageEnvelope, SEARCH_ALL_PAGE_SIZE};

/// Search entities on an endpoint that reports a total count.
///
/// Unlike [`List`](crate::List), full searches do not follow page links:
/// the first page's `count` fixes how many pages are fetched, and each
/// page is requested independently.
#[async_trait]
pub trait Search: Sized + Send + 'static {
    /// Fetch a single page of results.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn search_page(client: &OtxClient, opts: &ListOptions) -> Result<PageEnvelope<Self>>;

    /// Fetch every page of results.
    ///
    /// The page size defaults to 5 when unset, zero, or above the maximum.
    ///
    /// # Errors
    ///
    /// Returns the first page error, without retrying.
    async fn search_all(client: &OtxClient, opts: &ListOptions) -> Result<Vec<Self>> {
        let first_opts = first_page_options(opts);
        let first = Self::search_page(client, &first_opts).await?;
        let remaining = remaining_pages(&first_opts, first.total_count);

        let mut all_items = first.items;
        for page_opts in remaining {
            let page = Self::search_page(client, &page_opts).await?;
            all_items.extend(page.items);
        }

        Ok(all_items)
    }

    /// Fetch every page on a background task, delivering items through a
    /// channel holding at most `capacity` items.
    ///
    /// The producer forwards the first error as an `Err` item and stops. The
    /// channel closes when the producer finishes, on success or failure, so
    /// draining the stream always terminates.
    fn search_all_stream(
        client: OtxClient,
        opts: ListOptions,
        capacity: usize,
    ) -> SearchStream<Self> {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let handle = tokio::spawn(async move {
            if let Err(e) = produce::<Self>(&client, &opts, &tx).await {
                tracing::debug!(error = %e, "search producer stopped");
                let _ = tx.send(Err(e)).await;
            }
            // `tx` is dropped here, closing the channel.
        });

        SearchStream {
            receiver: rx,
            handle,
        }
    }
}

/// Items of a background search, in page order.
#[derive(Debug)]
pub struct SearchStream<T> {
    receiver: mpsc::Receiver<Result<T>>,
    handle: JoinHandle<()>,
}

impl<T> SearchStream<T> {
    /// Receive the next item. `None` once the producer has finished and
    /// every item has been drained. Dropping the stream early makes the
    /// producer stop at its next send.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.receiver.recv().await
    }

    /// Drain the stream into a vector, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error the producer forwarded.
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.receiver.recv().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Split into the raw receiver and the producer's task handle.
    pub fn into_parts(self) -> (mpsc::Receiver<Result<T>>, JoinHandle<()>) {
        (self.receiver, self.handle)
    }
}

async fn produce<T: Search>(
    client: &OtxClient,
    opts: &ListOptions,
    tx: &mpsc::Sender<Result<T>>,
) -> Result<()> {
    let first_opts = first_page_options(opts);
    let first = T::search_page(client, &first_opts).await?;
    let remaining = remaining_pages(&first_opts, first.total_count);

    if !forward(tx, first.items).await {
        return Ok(());
    }
    for page_opts in remaining {
        let page = T::search_page(client, &page_opts).await?;
        if !forward(tx, page.items).await {
            return Ok(());
        }
    }
    Ok(())
}

/// Send items; false when the consumer has gone away.
async fn forward<T>(tx: &mpsc::Sender<Result<T>>, items: Vec<T>) -> bool {
    for item in items {
        if tx.send(Ok(item)).await.is_err() {
            return false;
        }
    }
    true
}

fn first_page_options(opts: &ListOptions) -> ListOptions {
    let per_page = match opts.effective_per_page(SEARCH_ALL_PAGE_SIZE) {
        0 => SEARCH_ALL_PAGE_SIZE,
        n => n,
    };
    ListOptions {
        page: Some(1),
        per_page: Some(per_page),
        query: opts.query.clone(),
    }
}

fn remaining_pages(
    first_opts: &ListOptions,
    total_count: Option<u64>,
) -> impl Iterator<Item = ListOptions> + Send + '_ {
    let per_page = first_opts.per_page.unwrap_or(SEARCH_ALL_PAGE_SIZE);
    let pages = total_pages(total_count.unwrap_or(0), per_page);
    tracing::debug!(pages, per_page, "search page count");

    (2..=pages).map(move |page| {
        first_opts
            .clone()
            .with_page(u32::try_from(page).unwrap_or(u32::MAX))
    })
}
