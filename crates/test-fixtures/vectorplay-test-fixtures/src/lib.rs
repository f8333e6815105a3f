//! Shared fixtures and fakes for vectorplay tests and benches.
//!
//! Fixture animations are small JSON descriptions (duration, fps, damage,
//! injected faults) that [`FakeBackend`] turns into renderable handles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use vectorplay_core::{
    AnimationBackend, AnimationSource, BufferSurface, Color, DamageRect, DrawContext, EventBus,
    EventKind, FileType, Listener, ManualTimeSource, PixelBuffer, PlaybackError, PlayerEvent,
    PlayerStateMachine, Rect, RenderableAnimation, Surface, TickOutcome,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a String> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod animations {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.animations.keys().cloned().collect()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        Ok(fixtures_root().join(rel))
    }

    pub fn json(name: &str) -> Result<String> {
        let path = path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    /// Fixture as an inline JSON source
    pub fn source(name: &str) -> Result<AnimationSource> {
        let text = json(name)?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON fixture {name}"))?;
        Ok(AnimationSource::Json(value))
    }

    pub fn spec(name: &str) -> Result<FakeSpec> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {name}"))
    }
}

/// Damage a fake seek reports
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DamageSpec {
    /// `"full"` or `"none"`
    Named(String),
    Rect([f32; 4]),
}

impl Default for DamageSpec {
    fn default() -> Self {
        DamageSpec::Named("full".to_string())
    }
}

/// Description of a fake animation
#[derive(Clone, Debug, Deserialize)]
pub struct FakeSpec {
    #[serde(default)]
    pub name: String,
    pub duration: f64,
    pub fps: f64,
    #[serde(default)]
    pub damage: DamageSpec,
    /// Fill color drawn into pixel buffers
    #[serde(default)]
    pub color: Option<String>,
    /// 1-based render call that fails
    #[serde(default)]
    pub render_fault_at: Option<u32>,
    /// 1-based seek call that fails
    #[serde(default)]
    pub seek_fault_at: Option<u32>,
}

/// Calls observed by fake animations, shared with the test
#[derive(Clone, Debug, Default)]
pub struct BackendLog {
    pub loads: u32,
    pub seeks: Vec<f64>,
    pub renders: u32,
    pub disposed: u32,
    pub last_file_type: Option<FileType>,
    pub last_size: Option<(u32, u32)>,
}

/// Backend that builds [`FakeAnimation`]s from fixture descriptions.
/// `AnimationSource::Url` names a fixture from the manifest.
#[derive(Clone, Debug, Default)]
pub struct FakeBackend {
    log: Rc<RefCell<BackendLog>>,
    fail_next: Rc<RefCell<Option<String>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of everything the backend and its animations did
    pub fn log(&self) -> Rc<RefCell<BackendLog>> {
        Rc::clone(&self.log)
    }

    /// Make the next load fail with `reason`
    pub fn fail_next_load(&self, reason: &str) {
        *self.fail_next.borrow_mut() = Some(reason.to_string());
    }

    fn parse(source: &AnimationSource) -> std::result::Result<FakeSpec, PlaybackError> {
        let parsed = match source {
            AnimationSource::Json(value) => serde_json::from_value(value.clone()),
            AnimationSource::Bytes(bytes) => serde_json::from_slice(bytes),
            AnimationSource::Url(name) => {
                return animations::spec(name).map_err(|err| PlaybackError::load(err.to_string()))
            }
        };
        parsed.map_err(|err| PlaybackError::load(format!("malformed animation: {err}")))
    }
}

impl AnimationBackend for FakeBackend {
    fn load(
        &mut self,
        source: &AnimationSource,
        file_type: FileType,
        width: u32,
        height: u32,
    ) -> std::result::Result<Box<dyn RenderableAnimation>, PlaybackError> {
        if let Some(reason) = self.fail_next.borrow_mut().take() {
            return Err(PlaybackError::load(reason));
        }
        let spec = Self::parse(source)?;
        let mut log = self.log.borrow_mut();
        log.loads += 1;
        log.last_file_type = Some(file_type);
        log.last_size = Some((width, height));
        Ok(Box::new(FakeAnimation {
            spec,
            width,
            height,
            seeks: 0,
            renders: 0,
            log: Rc::clone(&self.log),
        }))
    }
}

/// Renderable driven by a [`FakeSpec`]
#[derive(Debug)]
pub struct FakeAnimation {
    spec: FakeSpec,
    width: u32,
    height: u32,
    seeks: u32,
    renders: u32,
    log: Rc<RefCell<BackendLog>>,
}

impl RenderableAnimation for FakeAnimation {
    fn duration(&self) -> f64 {
        self.spec.duration
    }

    fn fps(&self) -> f64 {
        self.spec.fps
    }

    fn seek(&mut self, fraction: f64) -> std::result::Result<DamageRect, PlaybackError> {
        self.seeks += 1;
        self.log.borrow_mut().seeks.push(fraction);
        if self.spec.seek_fault_at == Some(self.seeks) {
            return Err(PlaybackError::render(format!(
                "{}: seek {} failed",
                self.spec.name, self.seeks
            )));
        }
        Ok(match &self.spec.damage {
            DamageSpec::Named(name) if name == "none" => DamageRect::EMPTY,
            DamageSpec::Named(_) => DamageRect::full(self.width, self.height),
            DamageSpec::Rect([x0, y0, x1, y1]) => DamageRect::new(*x0, *y0, *x1, *y1),
        })
    }

    fn render(
        &mut self,
        context: &mut dyn DrawContext,
        _bounds: Rect,
    ) -> std::result::Result<(), PlaybackError> {
        self.renders += 1;
        self.log.borrow_mut().renders += 1;
        if self.spec.render_fault_at == Some(self.renders) {
            return Err(PlaybackError::render(format!(
                "{}: render {} failed",
                self.spec.name, self.renders
            )));
        }
        if let Some(color) = self.spec.color.as_deref() {
            let color = Color::from_hex(color)?;
            if let Some(pixels) = context.as_any_mut().downcast_mut::<PixelBuffer>() {
                pixels.fill(color);
            }
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed += 1;
    }
}

/// Surface calls, shared with the test
#[derive(Clone, Debug, Default)]
pub struct SurfaceLog {
    pub clears: u32,
    pub presents: u32,
    pub last_clear: Option<Color>,
    pub resizes: Vec<(u32, u32)>,
}

/// [`BufferSurface`] that records what the player did to it
#[derive(Debug)]
pub struct RecordingSurface {
    inner: BufferSurface,
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: BufferSurface::new(width, height),
            log: Rc::default(),
        }
    }

    pub fn log(&self) -> Rc<RefCell<SurfaceLog>> {
        Rc::clone(&self.log)
    }
}

impl Surface for RecordingSurface {
    fn context(&mut self) -> std::result::Result<&mut dyn DrawContext, PlaybackError> {
        self.inner.context()
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds()
    }

    fn clear(&mut self, color: Color) -> std::result::Result<(), PlaybackError> {
        let mut log = self.log.borrow_mut();
        log.clears += 1;
        log.last_clear = Some(color);
        self.inner.clear(color)
    }

    fn present(&mut self) -> std::result::Result<(), PlaybackError> {
        self.log.borrow_mut().presents += 1;
        self.inner.present()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().resizes.push((width, height));
        self.inner.resize(width, height);
    }
}

/// Collects dispatched events in order
#[derive(Clone, Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<PlayerEvent>>>,
    listener: Listener,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRecorder {
    pub fn new() -> Self {
        let events: Rc<RefCell<Vec<PlayerEvent>>> = Rc::default();
        let sink = Rc::clone(&events);
        let listener = Listener::infallible(move |event| sink.borrow_mut().push(event.clone()));
        Self { events, listener }
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    /// Register for every event kind on `bus`
    pub fn attach(&self, bus: &EventBus) {
        for kind in EventKind::ALL {
            bus.on(kind, &self.listener);
        }
    }

    pub fn events(&self) -> Vec<PlayerEvent> {
        self.events.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(|e| e.kind).collect()
    }

    /// Recorded kinds without `frame`
    pub fn transitions(&self) -> Vec<EventKind> {
        self.kinds()
            .into_iter()
            .filter(|kind| *kind != EventKind::Frame)
            .collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// A player wired to fakes, with handles to inspect them
pub struct Harness {
    pub player: PlayerStateMachine,
    pub time: Rc<ManualTimeSource>,
    pub backend: Rc<RefCell<BackendLog>>,
    pub surface: Rc<RefCell<SurfaceLog>>,
    pub recorder: EventRecorder,
    pub fakes: FakeBackend,
}

impl Harness {
    pub fn new(config: vectorplay_core::PlayerConfig) -> Result<Self> {
        let time = Rc::new(ManualTimeSource::new());
        let fakes = FakeBackend::new();
        let surface = RecordingSurface::new(config.width, config.height);
        let surface_log = surface.log();
        let player = PlayerStateMachine::new(
            config,
            Box::new(fakes.clone()),
            Box::new(surface),
            Box::new(Rc::clone(&time)),
        )?;
        let recorder = EventRecorder::new();
        recorder.attach(&player.events());
        Ok(Self {
            player,
            time: Rc::clone(&time),
            backend: fakes.log(),
            surface: surface_log,
            recorder,
            fakes,
        })
    }

    /// Load a manifest fixture by name
    pub fn load(&mut self, name: &str) -> Result<bool> {
        let source = animations::source(name)?;
        Ok(self.player.load(source))
    }

    /// Advance time by `step` and fire the pending tick, `count` times
    pub fn run_ticks(&mut self, step: f64, count: usize) -> Vec<TickOutcome> {
        run_ticks(&mut self.player, &self.time, step, count)
    }
}

/// Advance `time` by `step` and fire the next pending tick, up to `count`
/// times or until nothing is pending.
pub fn run_ticks(
    player: &mut PlayerStateMachine,
    time: &ManualTimeSource,
    step: f64,
    count: usize,
) -> Vec<TickOutcome> {
    let mut outcomes = Vec::with_capacity(count);
    for _ in 0..count {
        time.advance(step);
        match time.fire_next() {
            Some(handle) => outcomes.push(player.tick(handle)),
            None => break,
        }
    }
    outcomes
}
