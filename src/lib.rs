//! Retrospect is the core of a product landing page: an animated radial backdrop, scroll-driven
//! section reveals, and a waitlist sign-up.
//!
//! The pieces compose through explicit state rather than ambient globals:
//!
//! - A [`RadialFieldRenderer`] draws one frame for a [`ViewportState`] onto any [`Surface`]
//! - A [`FrameDispatcher`] owns the viewport state and redraws once per [`ViewportEvent`]
//! - A [`VisibilityObserver`] toggles a marker class on section content through an
//!   [`IntersectionSource`] subscription
//! - [`add_email`] validates and stores waitlist submissions in an [`EmailStore`]
//!
//! [`LandingPage`] wires all of them together.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod field;
pub(crate) mod render;
pub(crate) mod viewport;
pub(crate) mod visibility;
pub(crate) mod waitlist;

pub mod config;
pub mod page;

pub use crate::foundation::core::{Line, Point, Rect, Rgba, Size, Vec2, ViewportState};
pub use crate::foundation::error::{RetrospectError, RetrospectResult};

pub use crate::config::{SectionConfig, SiteConfig, ViewportConfig};
pub use crate::field::geometry::{
    ACCENT_INTERVAL, ACCENT_REACH, ELLIPSE_SCALE, FieldEllipse, SPOKE_COUNT, SPOKE_REACH, Spoke,
    is_accent, layout_spokes, polar_radius, spoke_angle,
};
pub use crate::field::renderer::{FieldStyle, RadialFieldRenderer, RedrawOutcome};
pub use crate::page::{LandingPage, PageSnapshot, Section};
pub use crate::render::backend::{FrameRGBA, StrokeStyle, Surface};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::viewport::dispatcher::{DispatchStats, FrameDispatcher};
pub use crate::viewport::events::{EventSource, MAX_SWEEP_EVENTS, ScriptedEvents, ViewportEvent};
pub use crate::visibility::dom::{Document, Element, ElementId};
pub use crate::visibility::intersection::{
    BoundingBoxWatcher, IntersectionEntry, IntersectionListener, IntersectionSource, WatchId,
    intersection_ratio,
};
pub use crate::visibility::observer::{ObservedPhase, VisibilityObserver, apply_entry};
pub use crate::visibility::selector::Selector;
pub use crate::waitlist::email::EmailAddress;
pub use crate::waitlist::endpoint::{
    STATUS_BAD_REQUEST, STATUS_CREATED, STATUS_INTERNAL_ERROR, SubmissionRequest,
    SubmissionResponse, add_email,
};
pub use crate::waitlist::form::{
    InProcessTransport, JOINED_MESSAGE, Notice, SubmissionTransport, WaitlistForm,
};
pub use crate::waitlist::store::{
    DUPLICATE_MESSAGE, EmailRecord, EmailStore, JsonFileStore, MemoryStore,
};
