//=========================================================================
// Asset Loader
//=========================================================================
//
// Ticketed image loading.
//
// Threading Model:
//   Logic thread  ──request(path)──→ [unbounded channel] ──→ worker
//   Logic thread  ←──poll()──────── [unbounded channel] ←── worker
//
// The worker exits when the loader (and with it the request sender) is
// dropped. `inline` resolves on the calling thread instead, for tests and
// hosts without threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{AssetError, ImageSource, LoadResult, Sprite};

//=== AssetTicket =========================================================

/// Claim check for one requested asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetTicket(u64);

//=== AssetLoader =========================================================

enum Backend {
    Inline(Box<dyn ImageSource>),
    Threaded {
        requests: Sender<(AssetTicket, String)>,
        results: Receiver<(AssetTicket, LoadResult)>,
    },
    /// Worker is gone; every outstanding ticket has been failed.
    Disconnected,
}

pub struct AssetLoader {
    backend: Backend,
    next_ticket: u64,
    pending: HashMap<AssetTicket, String>,
    settled: HashMap<AssetTicket, LoadResult>,
}

impl AssetLoader {
    /// Loads on a dedicated worker thread.
    pub fn threaded(source: impl ImageSource) -> Self {
        let (request_tx, request_rx) = unbounded::<(AssetTicket, String)>();
        let (result_tx, result_rx) = unbounded();

        let spawned = thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                debug!("Asset worker started");
                for (ticket, path) in request_rx {
                    let result = source.load(&path);
                    if result_tx.send((ticket, result)).is_err() {
                        break;
                    }
                }
                debug!("Asset worker stopped");
            });

        let backend = match spawned {
            Ok(_) => Backend::Threaded {
                requests: request_tx,
                results: result_rx,
            },
            Err(err) => {
                warn!("Failed to spawn asset worker, assets will use placeholders: {}", err);
                Backend::Disconnected
            }
        };

        Self::with_backend(backend)
    }

    /// Loads synchronously inside `request`.
    pub fn inline(source: impl ImageSource) -> Self {
        Self::with_backend(Backend::Inline(Box::new(source)))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            next_ticket: 0,
            pending: HashMap::new(),
            settled: HashMap::new(),
        }
    }

    //--- Requests ---------------------------------------------------------

    pub fn request(&mut self, path: impl Into<String>) -> AssetTicket {
        let ticket = AssetTicket(self.next_ticket);
        self.next_ticket += 1;
        let path = path.into();

        match &self.backend {
            Backend::Inline(source) => {
                let result = source.load(&path);
                self.settled.insert(ticket, result);
            }
            Backend::Threaded { requests, .. } => {
                if requests.send((ticket, path.clone())).is_ok() {
                    self.pending.insert(ticket, path);
                } else {
                    self.settled.insert(ticket, closed(&path));
                }
            }
            Backend::Disconnected => {
                self.settled.insert(ticket, closed(&path));
            }
        }

        ticket
    }

    //--- Completion -------------------------------------------------------

    /// Moves finished loads from the worker into the settled set.
    pub fn poll(&mut self) {
        let Backend::Threaded { results, .. } = &self.backend else {
            return;
        };

        loop {
            match results.try_recv() {
                Ok((ticket, result)) => {
                    // Forgotten tickets are dropped on arrival.
                    if self.pending.remove(&ticket).is_some() {
                        self.settled.insert(ticket, result);
                    }
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        warn!("Asset worker disconnected with {} pending loads", self.pending.len());
        for (ticket, path) in self.pending.drain() {
            self.settled.insert(ticket, closed(&path));
        }
        self.backend = Backend::Disconnected;
    }

    pub fn is_settled(&self, ticket: AssetTicket) -> bool {
        self.settled.contains_key(&ticket)
    }

    /// Claims a settled result. Returns `None` while still loading.
    pub fn take(&mut self, ticket: AssetTicket) -> Option<LoadResult> {
        self.settled.remove(&ticket)
    }

    /// Drops interest in a ticket; its result is discarded when it lands.
    pub fn forget(&mut self, ticket: AssetTicket) {
        self.settled.remove(&ticket);
        self.pending.remove(&ticket);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn closed(path: &str) -> LoadResult {
    LoadResult::Failed(AssetError::LoaderClosed {
        path: PathBuf::from(path),
    })
}

//=== AssetBatch ==========================================================

/// All-must-settle join over a group of glyph requests.
///
/// Individual failures become placeholders, so the join itself cannot
/// fail; it only waits.
#[derive(Debug, Default)]
pub struct AssetBatch {
    entries: Vec<(char, AssetTicket)>,
}

impl AssetBatch {
    /// Requests one asset per glyph, in order, using `path_for` to name it.
    pub fn request(
        loader: &mut AssetLoader,
        glyphs: &[char],
        path_for: impl Fn(char) -> String,
    ) -> Self {
        let entries = glyphs
            .iter()
            .map(|&glyph| (glyph, loader.request(path_for(glyph))))
            .collect();
        Self { entries }
    }

    /// Returns the sprites, in request order, once every ticket settled.
    pub fn poll(&mut self, loader: &mut AssetLoader) -> Option<Vec<Sprite>> {
        loader.poll();

        let ready = self
            .entries
            .iter()
            .all(|(_, ticket)| loader.is_settled(*ticket));
        if !ready {
            return None;
        }

        let sprites = self
            .entries
            .drain(..)
            .map(|(glyph, ticket)| match loader.take(ticket) {
                Some(result) => Sprite::resolve(glyph, result),
                None => Sprite::placeholder(glyph),
            })
            .collect();
        Some(sprites)
    }

    /// Abandons the outstanding tickets.
    pub fn cancel(&mut self, loader: &mut AssetLoader) {
        for (_, ticket) in self.entries.drain(..) {
            loader.forget(ticket);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
