use serde::Deserialize;
use std::collections::HashSet;

/// Horizontal drag distance (px) a release must exceed to change image.
pub const SWIPE_THRESHOLD: f64 = 50.0;

pub const OVERLAY_SHOW_DELAY_MS: u32 = 10;
pub const OVERLAY_FADE_MS: u32 = 300;
pub const FADE_OUT_MS: u32 = 200;
pub const SETTLE_MS: u32 = 50;
pub const FADE_IN_MS: u32 = 300;
pub const SNAP_BACK_MS: u32 = 300;
/// Counted from the moment the new source is swapped in.
pub const LOAD_FALLBACK_MS: u32 = 1000;

const HIDDEN_SCALE: f64 = 0.9;
const MIN_DRAG_SCALE: f64 = 0.8;
const MIN_DRAG_OPACITY: f64 = 0.5;
const DRAG_SCALE_FALLOFF: f64 = 1000.0;
const DRAG_OPACITY_FALLOFF: f64 = 500.0;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
}

pub fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

pub fn wrap_previous(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

/// Inline style overrides for the lightbox image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStyle {
    pub translate_x: f64,
    pub scale: f64,
    pub opacity: f64,
    pub animated: bool,
}

impl ImageStyle {
    pub fn rest(animated: bool) -> Self {
        Self {
            translate_x: 0.0,
            scale: 1.0,
            opacity: 1.0,
            animated,
        }
    }

    pub fn hidden() -> Self {
        Self {
            translate_x: 0.0,
            scale: HIDDEN_SCALE,
            opacity: 0.0,
            animated: true,
        }
    }

    /// Live preview while the pointer is dragging; never fully fades or shrinks.
    pub fn dragged(delta_x: f64) -> Self {
        let distance = delta_x.abs();
        Self {
            translate_x: delta_x,
            scale: (1.0 - distance / DRAG_SCALE_FALLOFF).max(MIN_DRAG_SCALE),
            opacity: (1.0 - distance / DRAG_OPACITY_FALLOFF).max(MIN_DRAG_OPACITY),
            animated: false,
        }
    }

    pub fn to_css(&self) -> String {
        let mut css = format!(
            "transform: translateX({}px) scale({}); opacity: {};",
            self.translate_x, self.scale, self.opacity
        );
        if self.animated {
            css.push_str(" transition: all 0.3s ease-out;");
        }
        css
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    pub start_x: f64,
    pub current_x: f64,
}

impl DragState {
    pub fn delta(&self) -> f64 {
        self.current_x - self.start_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Idle,
    Navigating,
    Dragging,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    FadingOut,
    Loading,
    Settling,
    FadingIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
    stage: Stage,
    opening: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    ShowOverlay,
    FadeOutDone,
    SettleDone,
    FadeInDone,
    LoadFallback,
    SnapBackDone,
    CloseDone,
}

/// A delayed callback. Stale generations are ignored when delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub generation: u64,
    pub kind: TimerKind,
}

/// Side effects the host must carry out on behalf of the viewer.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LockScroll,
    UnlockScroll,
    /// Load `src` and report back through `on_image_loaded` / `on_image_failed`.
    Preload { src: String, generation: u64 },
    /// Warm the browser cache; the outcome is not reported.
    Prefetch { src: String },
    Schedule { delay_ms: u32, timer: Timer },
}

/// Lightbox viewer state. Every operation returns the effects it needs run.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewer {
    images: Vec<ImageDescriptor>,
    current_index: usize,
    displayed_index: Option<usize>,
    is_open: bool,
    overlay_visible: bool,
    closing: bool,
    transition: Option<Transition>,
    drag: DragState,
    image_style: Option<ImageStyle>,
    pressed_on_backdrop: bool,
    generation: u64,
}

impl Viewer {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self {
            images,
            current_index: 0,
            displayed_index: None,
            is_open: false,
            overlay_visible: false,
            closing: false,
            transition: None,
            drag: DragState::default(),
            image_style: None,
            pressed_on_backdrop: false,
            generation: 0,
        }
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Nav buttons stay clickable while busy; input is dropped instead.
    pub fn controls_busy(&self) -> bool {
        self.is_animating()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn phase(&self) -> Phase {
        if !self.is_open {
            Phase::Closed
        } else if self.closing {
            Phase::Closing
        } else if let Some(transition) = self.transition {
            if transition.opening {
                Phase::Opening
            } else {
                Phase::Navigating
            }
        } else if self.drag.is_dragging {
            Phase::Dragging
        } else {
            Phase::Idle
        }
    }

    /// The descriptor currently shown by the image element.
    pub fn displayed(&self) -> Option<&ImageDescriptor> {
        self.displayed_index.and_then(|i| self.images.get(i))
    }

    pub fn counter_label(&self) -> String {
        match self.displayed_index {
            Some(i) => format!("{} / {}", i + 1, self.images.len()),
            None => String::new(),
        }
    }

    pub fn image_style(&self) -> Option<ImageStyle> {
        self.image_style
    }

    pub fn image_css(&self) -> String {
        self.image_style.map(|s| s.to_css()).unwrap_or_default()
    }

    /// Best-effort warm cache for the whole list, one request per distinct source.
    pub fn warm_cache(&self) -> Vec<Effect> {
        let mut seen = HashSet::new();
        self.images
            .iter()
            .filter(|image| seen.insert(image.src.as_str()))
            .map(|image| Effect::Prefetch {
                src: image.src.clone(),
            })
            .collect()
    }

    /// Out-of-range indices are rejected as a no-op, as are calls made while
    /// a transition is in flight or the overlay is fading out.
    pub fn open(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.images.len() {
            log::warn!(
                "gallery: ignoring open({}) for {} images",
                index,
                self.images.len()
            );
            return Vec::new();
        }
        if self.is_animating() || self.closing {
            return Vec::new();
        }

        let mut effects = Vec::new();
        let opening = !self.is_open;
        if opening {
            self.is_open = true;
            self.overlay_visible = false;
            effects.push(Effect::LockScroll);
        }

        self.current_index = index;
        self.begin_transition(opening, &mut effects);

        if opening {
            effects.push(self.schedule(OVERLAY_SHOW_DELAY_MS, TimerKind::ShowOverlay));
        }
        effects
    }

    /// Allowed mid-transition; the in-flight transition is abandoned.
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.is_open || self.closing {
            return Vec::new();
        }

        self.closing = true;
        self.generation += 1;
        self.transition = None;
        self.drag = DragState::default();
        self.overlay_visible = false;

        vec![self.schedule(OVERLAY_FADE_MS, TimerKind::CloseDone)]
    }

    pub fn next(&mut self) -> Vec<Effect> {
        if !self.can_navigate() {
            return Vec::new();
        }
        self.current_index = wrap_next(self.current_index, self.images.len());

        let mut effects = Vec::new();
        self.begin_transition(false, &mut effects);
        effects
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        if !self.can_navigate() {
            return Vec::new();
        }
        self.current_index = wrap_previous(self.current_index, self.images.len());

        let mut effects = Vec::new();
        self.begin_transition(false, &mut effects);
        effects
    }

    pub fn handle_key(&mut self, key: &str) -> Vec<Effect> {
        if !self.is_open {
            return Vec::new();
        }
        match key {
            "Escape" => self.close(),
            "ArrowLeft" => self.previous(),
            "ArrowRight" => self.next(),
            _ => Vec::new(),
        }
    }

    /// Records where a press on the overlay began.
    pub fn overlay_press(&mut self, on_backdrop: bool) {
        self.pressed_on_backdrop = self.is_open && on_backdrop;
    }

    /// Closes only when the press also began on the backdrop. A drag that
    /// starts on the image and is released over the backdrop still produces a
    /// click there, and must not count.
    pub fn backdrop_click(&mut self, on_backdrop: bool) -> Vec<Effect> {
        let pressed = std::mem::take(&mut self.pressed_on_backdrop);
        if pressed && on_backdrop {
            self.close()
        } else {
            Vec::new()
        }
    }

    /// Returns whether the drag was accepted, so the host can suppress the
    /// native image drag.
    pub fn drag_start(&mut self, x: f64) -> bool {
        if !self.is_open || self.closing || self.is_animating() {
            return false;
        }

        self.drag = DragState {
            is_dragging: true,
            start_x: x,
            current_x: x,
        };
        if let Some(style) = self.image_style.as_mut() {
            style.animated = false;
        }
        true
    }

    pub fn drag_move(&mut self, x: f64) {
        if !self.drag.is_dragging {
            return;
        }
        self.drag.current_x = x;

        // A keyboard step may have started mid-drag; leave its fade alone.
        if !self.is_animating() {
            self.image_style = Some(ImageStyle::dragged(self.drag.delta()));
        }
    }

    pub fn drag_end(&mut self) -> Vec<Effect> {
        if !self.drag.is_dragging {
            return Vec::new();
        }

        let delta = self.drag.delta();
        self.drag = DragState::default();

        let mut effects = Vec::new();
        if !self.is_animating() {
            self.image_style = Some(ImageStyle::rest(true));
            effects.push(self.schedule(SNAP_BACK_MS, TimerKind::SnapBackDone));
        }

        if delta.abs() > SWIPE_THRESHOLD {
            if delta > 0.0 {
                effects.extend(self.previous());
            } else {
                effects.extend(self.next());
            }
        }
        effects
    }

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        if timer.generation != self.generation {
            return Vec::new();
        }

        match timer.kind {
            TimerKind::ShowOverlay => {
                if self.is_open && !self.closing {
                    self.overlay_visible = true;
                }
                Vec::new()
            }
            TimerKind::FadeOutDone => self.swap_image(),
            TimerKind::SettleDone => self.reveal(),
            TimerKind::FadeInDone => {
                if self.stage() == Some(Stage::FadingIn) {
                    self.transition = None;
                    self.image_style = Some(ImageStyle::rest(false));
                }
                Vec::new()
            }
            TimerKind::LoadFallback => {
                match self.stage() {
                    Some(Stage::Loading) | Some(Stage::Settling) => {
                        log::warn!("gallery: image load timed out, revealing anyway");
                        self.image_style = Some(ImageStyle::rest(true));
                        self.transition = None;
                    }
                    Some(Stage::FadingIn) => self.transition = None,
                    Some(Stage::FadingOut) | None => {}
                }
                Vec::new()
            }
            TimerKind::SnapBackDone => {
                if !self.is_animating() && !self.drag.is_dragging {
                    if let Some(style) = self.image_style.as_mut() {
                        style.animated = false;
                    }
                }
                Vec::new()
            }
            TimerKind::CloseDone => {
                if !self.closing {
                    return Vec::new();
                }
                self.closing = false;
                self.is_open = false;
                self.image_style = None;
                vec![Effect::UnlockScroll]
            }
        }
    }

    pub fn on_image_loaded(&mut self, generation: u64) -> Vec<Effect> {
        self.preload_settled(generation)
    }

    /// The broken image is left visible; no retry.
    pub fn on_image_failed(&mut self, generation: u64) -> Vec<Effect> {
        self.preload_settled(generation)
    }

    fn can_navigate(&self) -> bool {
        self.is_open && !self.closing && !self.is_animating() && !self.images.is_empty()
    }

    fn stage(&self) -> Option<Stage> {
        self.transition.map(|t| t.stage)
    }

    fn set_stage(&mut self, stage: Stage) {
        if let Some(transition) = self.transition.as_mut() {
            transition.stage = stage;
        }
    }

    fn schedule(&self, delay_ms: u32, kind: TimerKind) -> Effect {
        Effect::Schedule {
            delay_ms,
            timer: Timer {
                generation: self.generation,
                kind,
            },
        }
    }

    fn begin_transition(&mut self, opening: bool, effects: &mut Vec<Effect>) {
        self.generation += 1;
        self.transition = Some(Transition {
            stage: Stage::FadingOut,
            opening,
        });
        self.image_style = Some(ImageStyle::hidden());
        effects.push(self.schedule(FADE_OUT_MS, TimerKind::FadeOutDone));
    }

    fn swap_image(&mut self) -> Vec<Effect> {
        if self.stage() != Some(Stage::FadingOut) {
            return Vec::new();
        }

        self.displayed_index = Some(self.current_index);
        self.set_stage(Stage::Loading);

        vec![
            Effect::Preload {
                src: self.images[self.current_index].src.clone(),
                generation: self.generation,
            },
            self.schedule(LOAD_FALLBACK_MS, TimerKind::LoadFallback),
        ]
    }

    fn preload_settled(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.generation || self.stage() != Some(Stage::Loading) {
            return Vec::new();
        }
        self.set_stage(Stage::Settling);
        vec![self.schedule(SETTLE_MS, TimerKind::SettleDone)]
    }

    fn reveal(&mut self) -> Vec<Effect> {
        if self.stage() != Some(Stage::Settling) {
            return Vec::new();
        }
        self.image_style = Some(ImageStyle::rest(true));
        self.set_stage(Stage::FadingIn);
        vec![self.schedule(FADE_IN_MS, TimerKind::FadeInDone)]
    }
}
