//! Floating canvas engine.
//!
//! `FloatingCanvas` owns the placed-image set for one mounted canvas and is
//! the only thing that mutates it:
//!
//! - **Initialization**: once mounted on a measured, non-compact viewport,
//!   the host asks for an `InitTicket`, probes every image (concurrently,
//!   outside of any borrow of the canvas), then hands the results back with
//!   the ticket. Tickets are bound to the mount epoch, so results arriving
//!   after `unmount` are ignored.
//!
//! - **Interaction**: pointer events go through the `DragTool`, which emits
//!   `CanvasMutation`s that are applied live. There is no commit step.
//!
//! - **Responsive switch**: resizing below the breakpoint drops any drag in
//!   progress and renders the static grid; resizing back re-enables
//!   initialization if it never completed.
//!
//! - **Entrance**: every fresh presentation (installed arrangement, mode
//!   switch, remount) starts hidden. The host paints it once, then calls
//!   [`FloatingCanvas::reveal`] so the staggered fade/scale transition runs.

use crate::drag::{DragMode, DragTool, Grab, Mutations};
use crate::hit::{Hit, hit_test};
use crate::input::InputEvent;
use crate::responsive::{ModeChange, ViewportMode};
use collage_core::CanvasConfig;
use collage_core::error::{ConfigError, LoadError};
use collage_core::grid::{GridTile, compact_tiles};
use collage_core::id::ImageId;
use collage_core::layout::{Viewport, scatter};
use collage_core::model::{Corner, ImageRecord, PlacedImage};
use collage_core::probe::{ImageProbe, NaturalSize, probe_all};
use collage_core::zorder::ZOrder;
use kurbo::Point;
use rand::Rng;
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "No images available";

/// A single change to the placed-image set. Unknown ids are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasMutation {
    BringToFront { id: ImageId },
    SetPosition { id: ImageId, position: Point },
    /// Resize to `width` (clamped); height follows the aspect ratio and the
    /// `anchor` corner stays put.
    SetWidth { id: ImageId, width: f64, anchor: Corner },
    SetRotation { id: ImageId, degrees: f64 },
}

impl CanvasMutation {
    pub fn id(&self) -> ImageId {
        match self {
            Self::BringToFront { id }
            | Self::SetPosition { id, .. }
            | Self::SetWidth { id, .. }
            | Self::SetRotation { id, .. } => *id,
        }
    }
}

/// Permission to install one initialization result. Bound to the mount it
/// was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitTicket {
    epoch: u64,
}

pub struct FloatingCanvas {
    records: Vec<ImageRecord>,
    config: CanvasConfig,

    /// Empty until initialization completes; then exactly one per record.
    images: Vec<PlacedImage>,
    z_order: ZOrder,
    tool: DragTool,

    viewport: Viewport,
    mode: ViewportMode,
    /// Whether the current presentation has played its entrance.
    revealed: bool,

    mounted: bool,
    /// Bumped on every unmount; stale tickets carry an older value.
    epoch: u64,
    /// Epoch of the outstanding ticket, if any.
    pending: Option<u64>,
}

impl FloatingCanvas {
    /// Create a mounted canvas for `records`. The viewport is unmeasured
    /// until the host calls [`set_viewport`](Self::set_viewport).
    pub fn new(records: Vec<ImageRecord>, config: CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            records,
            config,
            images: Vec::new(),
            z_order: ZOrder::default(),
            tool: DragTool::new(),
            viewport: Viewport::default(),
            mode: ViewportMode::Free,
            revealed: false,
            mounted: true,
            epoch: 0,
            pending: None,
        })
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    pub fn mount(&mut self) {
        if !self.mounted {
            log::debug!("canvas mounted (epoch {})", self.epoch);
            self.mounted = true;
        }
    }

    /// Tear down: release any drag, discard the arrangement and invalidate
    /// outstanding init tickets.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.tool.cancel();
        self.images.clear();
        self.z_order = ZOrder::default();
        self.pending = None;
        self.revealed = false;
        self.epoch += 1;
        self.mounted = false;
        log::debug!("canvas unmounted (epoch now {})", self.epoch);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Record new viewport dimensions and re-evaluate compact mode.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> ModeChange {
        self.viewport = Viewport::new(width, height);
        let next = ViewportMode::for_width(width, &self.config);
        let change = ModeChange::between(self.mode, next);
        self.mode = next;
        if change == ModeChange::EnteredCompact {
            self.tool.cancel();
        }
        if change != ModeChange::Unchanged {
            self.revealed = false;
            log::debug!("viewport {width}x{height}: {change:?}");
        }
        change
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn is_compact(&self) -> bool {
        self.mode.is_compact()
    }

    // ─── Initialization ──────────────────────────────────────────────────

    pub fn is_initialized(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn needs_initialization(&self) -> bool {
        self.mounted
            && !self.is_compact()
            && !self.records.is_empty()
            && !self.is_initialized()
            && self.pending.is_none()
            && self.viewport.is_measured()
    }

    /// Start initialization if it is due. The caller probes
    /// [`records`](Self::records) and completes with the returned ticket.
    pub fn begin_initialization(&mut self) -> Option<InitTicket> {
        if !self.needs_initialization() {
            return None;
        }
        self.pending = Some(self.epoch);
        log::debug!("initialization started for {} images", self.records.len());
        Some(InitTicket { epoch: self.epoch })
    }

    /// Install probe results. Returns `false` when the ticket is stale, the
    /// set is already initialized, or the viewport is unusable (in which
    /// case initialization may be started again later).
    pub fn complete_initialization<R: Rng>(
        &mut self,
        ticket: InitTicket,
        probes: &[Result<NaturalSize, LoadError>],
        rng: &mut R,
    ) -> bool {
        if !self.mounted || ticket.epoch != self.epoch {
            log::debug!("ignoring stale initialization (epoch {})", ticket.epoch);
            return false;
        }
        if self.pending != Some(ticket.epoch) || self.is_initialized() {
            return false;
        }
        self.pending = None;

        match scatter(&self.records, probes, self.viewport, &self.config, rng) {
            Ok(arrangement) => {
                self.images = arrangement.images;
                self.z_order = arrangement.z_order;
                self.revealed = false;
                true
            }
            Err(e) => {
                log::warn!("initialization deferred: {e}");
                false
            }
        }
    }

    /// Begin, probe and complete in one go. Returns whether the set was
    /// installed.
    pub async fn initialize<P: ImageProbe, R: Rng>(&mut self, probe: &P, rng: &mut R) -> bool {
        let Some(ticket) = self.begin_initialization() else {
            return false;
        };
        let probes = probe_all(probe, &self.records).await;
        self.complete_initialization(ticket, &probes, rng)
    }

    /// Start the entrance transition of whatever is on screen. Returns
    /// `true` if the view changed.
    pub fn reveal(&mut self) -> bool {
        if !self.mounted || self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    // ─── Interaction ─────────────────────────────────────────────────────

    /// Pointer-down at a viewport point; the grabbed part is found by hit
    /// testing. Returns `true` if a re-render is needed.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let hit = hit_test(&self.images, Point::new(x, y), &self.config);
        self.dispatch(InputEvent::from_pointer_down(x, y), hit)
    }

    /// Pointer-down on a known image part, for hosts that attach listeners
    /// to handle elements directly.
    pub fn pointer_down_on(&mut self, id: ImageId, mode: DragMode, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::from_pointer_down(x, y), Some(Hit { id, mode }))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::from_pointer_move(x, y), None)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::from_pointer_up(x, y), None)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.dispatch(InputEvent::PointerLeave, None)
    }

    /// Feed a normalized event. `hit` is only read for pointer-down.
    pub fn handle_event(&mut self, event: InputEvent, hit: Option<Hit>) -> bool {
        self.dispatch(event, hit)
    }

    fn dispatch(&mut self, event: InputEvent, hit: Option<Hit>) -> bool {
        if self.is_compact() || !self.mounted {
            return false;
        }
        let was_dragging = self.tool.is_dragging();
        let grab = hit.and_then(|hit| {
            self.get(hit.id).map(|image| Grab {
                id: hit.id,
                mode: hit.mode,
                geometry: image.geometry(),
            })
        });
        let mutations = self.tool.handle(&event, grab);
        let changed = self.apply_mutations(mutations);
        changed || was_dragging != self.tool.is_dragging()
    }

    fn apply_mutations(&mut self, mutations: Mutations) -> bool {
        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        changed
    }

    /// Apply one mutation. Returns `false` for ids not in the set.
    pub fn apply_mutation(&mut self, mutation: CanvasMutation) -> bool {
        let config = &self.config;
        let viewport = self.viewport;
        let images = &mut self.images;

        let changed = match mutation {
            CanvasMutation::BringToFront { id } => {
                self.z_order.bring_to_front(images, id).is_some()
            }
            CanvasMutation::SetPosition { id, position } => find_mut(images, id)
                .map(|image| {
                    image.position = position;
                    if config.clamp_moves {
                        image.clamp_into(viewport.size());
                    }
                })
                .is_some(),
            CanvasMutation::SetWidth { id, width, anchor } => find_mut(images, id)
                .map(|image| image.set_width(width, anchor, config))
                .is_some(),
            CanvasMutation::SetRotation { id, degrees } => find_mut(images, id)
                .map(|image| image.rotation_degrees = degrees)
                .is_some(),
        };

        if changed {
            log::trace!("{mutation:?}");
        } else {
            log::trace!("mutation for unknown image {}", mutation.id());
        }
        changed
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    pub fn get(&self, id: ImageId) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn active_id(&self) -> Option<ImageId> {
        self.tool.active_id()
    }

    pub fn z_top(&self) -> u32 {
        self.z_order.top()
    }

    // ─── View model ──────────────────────────────────────────────────────

    /// What the host should render right now.
    pub fn view(&self) -> CanvasView {
        if self.records.is_empty() {
            return CanvasView::Empty {
                message: EMPTY_MESSAGE.to_string(),
            };
        }
        if self.is_compact() {
            return CanvasView::Compact {
                tiles: compact_tiles(&self.records, &self.config, self.revealed),
            };
        }
        if !self.is_initialized() {
            return CanvasView::Loading;
        }

        let active = self.active_id();
        let images = self
            .images
            .iter()
            .zip(&self.records)
            .enumerate()
            .map(|(i, (image, record))| {
                let dragging = active == Some(image.id);
                ImageView {
                    id: image.id,
                    url: record.url.clone(),
                    alt: record.alt_or_default().to_string(),
                    x: image.position.x,
                    y: image.position.y,
                    width: image.width(),
                    height: image.height(),
                    z_index: image.z_index,
                    rotation: image.rotation_degrees,
                    scale: if dragging {
                        self.config.drag_lift_scale
                    } else {
                        1.0
                    },
                    dragging,
                    visible: self.revealed,
                    reveal_delay_ms: i as u32 * self.config.reveal_stagger_ms,
                }
            })
            .collect();
        CanvasView::Free { images }
    }
}

fn find_mut(images: &mut [PlacedImage], id: ImageId) -> Option<&mut PlacedImage> {
    images.iter_mut().find(|img| img.id == id)
}

/// Render snapshot handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum CanvasView {
    Empty { message: String },
    Compact { tiles: Vec<GridTile> },
    Loading,
    Free { images: Vec<ImageView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: ImageId,
    pub url: String,
    pub alt: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: u32,
    /// Degrees, unbounded.
    pub rotation: f64,
    pub scale: f64,
    pub dragging: bool,
    /// Opacity target; fades in after `reveal_delay_ms` once revealed.
    pub visible: bool,
    pub reveal_delay_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use collage_core::probe::StaticProbe;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ready_canvas(prefix: &str) -> FloatingCanvas {
        let records = vec![
            ImageRecord::new(&format!("{prefix}_a"), "/a.jpg"),
            ImageRecord::new(&format!("{prefix}_b"), "/b.jpg"),
        ];
        let probe = StaticProbe::new().with("/a.jpg", 400, 300).with("/b.jpg", 300, 400);
        let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
        canvas.set_viewport(1280.0, 800.0);
        assert!(block_on(canvas.initialize(&probe, &mut StdRng::seed_from_u64(5))));
        canvas
    }

    #[test]
    fn unknown_id_mutation_is_noop() {
        let mut canvas = ready_canvas("noop");
        let before = canvas.images().to_vec();
        let changed = canvas.apply_mutation(CanvasMutation::SetRotation {
            id: ImageId::intern("noop_missing"),
            degrees: 45.0,
        });
        assert!(!changed);
        assert_eq!(canvas.images(), before.as_slice());
    }

    #[test]
    fn pointer_down_on_unknown_id_does_not_drag() {
        let mut canvas = ready_canvas("ghost");
        let ghost = ImageId::intern("ghost_missing");
        let changed = canvas.pointer_down_on(ghost, DragMode::Move, 10.0, 10.0);
        assert!(!changed);
        assert_eq!(canvas.active_id(), None);
        assert!(!canvas.pointer_move(50.0, 50.0));
    }

    #[test]
    fn empty_records_render_message() {
        let canvas = FloatingCanvas::new(Vec::new(), CanvasConfig::default()).unwrap();
        assert_eq!(
            canvas.view(),
            CanvasView::Empty {
                message: "No images available".to_string()
            }
        );
    }

    #[test]
    fn dragged_image_is_lifted() {
        let mut canvas = ready_canvas("lift");
        let id = ImageId::intern("lift_b");
        canvas.pointer_down_on(id, DragMode::Move, 0.0, 0.0);
        let CanvasView::Free { images } = canvas.view() else {
            panic!("expected free view");
        };
        let lifted = images.iter().find(|v| v.id == id).unwrap();
        assert!(lifted.dragging);
        assert_eq!(lifted.scale, 1.08);
        assert_eq!(images[0].scale, 1.0);
        assert_eq!(images[1].reveal_delay_ms, 100);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = CanvasConfig {
            min_size: 0.0,
            ..CanvasConfig::default()
        };
        assert!(FloatingCanvas::new(Vec::new(), cfg).is_err());
    }

    #[test]
    fn cancel_event_releases_drag() {
        let mut canvas = ready_canvas("cancel");
        let id = ImageId::intern("cancel_a");
        canvas.pointer_down_on(id, DragMode::Rotate, 0.0, 0.0);
        assert_eq!(canvas.active_id(), Some(id));
        assert!(canvas.handle_event(InputEvent::PointerCancel, None));
        assert_eq!(canvas.active_id(), None);
        assert!(!canvas.handle_event(InputEvent::from_pointer_move(40.0, 40.0), None));
    }

    #[test]
    fn entrance_replays_after_mode_switch() {
        let mut canvas = ready_canvas("entrance");
        assert!(!canvas.is_revealed());
        assert!(canvas.reveal());
        assert!(!canvas.reveal());

        canvas.set_viewport(600.0, 800.0);
        assert!(!canvas.is_revealed());
        canvas.set_viewport(700.0, 800.0);
        assert!(canvas.reveal());
        canvas.unmount();
        assert!(!canvas.reveal());
    }
}
