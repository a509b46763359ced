use log::{debug, info, warn};

use crate::animation::{AnimationEngine, Phase, Run, RunKind, SpinTargetSource};
use crate::config::WheelConfig;
use crate::constants::{DEFAULT_SCALE, POINTER_DEPTH, POINTER_HALF_WIDTH, POINTER_TOP_OVERHANG};
use crate::error::WheelError;
use crate::observable::{Observable, SubscriptionId};
use crate::render::{ArcCanvas, Orientation, Rect};
use crate::segment::{default_segments, map_angle, normalize_angle, sweep_angle, Color, Segment, WheelValue};
use crate::snapshot::WheelSnapshot;

/// The spinning wheel: animation state, input gate, result property and
/// drawing. Framework bindings drive it through `on_mount`, `on_unmount`,
/// `tick` and `on_tap`.
///
/// Fresh spins always start from 0°, so whenever the wheel is idle its angle
/// is either 0 or the terminal angle of the last completed spin.
pub struct WheelWidget {
    config: WheelConfig,
    segments: Vec<Segment>,
    targets: Box<dyn SpinTargetSource>,
    engine: AnimationEngine,
    phase: Phase,
    angle: f32,
    elapsed_ms: i64,
    spin_to: Option<f32>,
    scale: f32,
    input_enabled: bool,
    mounted: bool,
    resume_pending: bool,
    invalidated: bool,
    result: Observable<WheelValue>,
}

impl WheelWidget {
    pub fn new(config: WheelConfig, targets: impl SpinTargetSource + 'static) -> Result<Self, WheelError> {
        Self::with_segments(config, default_segments(), targets)
    }

    pub fn with_segments(
        config: WheelConfig,
        segments: Vec<Segment>,
        targets: impl SpinTargetSource + 'static,
    ) -> Result<Self, WheelError> {
        config.validate()?;
        if segments.is_empty() {
            return Err(WheelError::InvalidConfig("wheel needs at least one segment".to_string()));
        }
        Ok(Self::build(config, segments, Box::new(targets)))
    }

    /// Default configuration and segment table, which are always valid.
    pub fn with_defaults(targets: impl SpinTargetSource + 'static) -> Self {
        Self::build(WheelConfig::default(), default_segments(), Box::new(targets))
    }

    fn build(config: WheelConfig, segments: Vec<Segment>, targets: Box<dyn SpinTargetSource>) -> Self {
        Self {
            config,
            segments,
            targets,
            engine: AnimationEngine::new(),
            phase: Phase::Idle,
            angle: 0.0,
            elapsed_ms: 0,
            spin_to: None,
            scale: DEFAULT_SCALE,
            input_enabled: true,
            mounted: false,
            resume_pending: false,
            invalidated: true,
            result: Observable::new(WheelValue::None),
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    pub fn spin_to(&self) -> Option<f32> {
        self.spin_to
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_running()
    }

    pub fn current_result(&self) -> WheelValue {
        *self.result.get()
    }

    pub fn subscribe_result(&mut self, callback: impl FnMut(&WheelValue) + 'static) -> SubscriptionId {
        self.result.subscribe(callback)
    }

    pub fn unsubscribe_result(&mut self, id: SubscriptionId) -> bool {
        self.result.unsubscribe(id)
    }

    /// Consumes the pending redraw request, if any.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// Segment the wheel currently points at.
    pub fn segment_at_angle(&self) -> Option<&Segment> {
        map_angle(self.angle, &self.segments)
    }

    /// Starts a spin. Returns `false` when the tap was ignored.
    pub fn on_tap(&mut self) -> bool {
        if !self.input_enabled || self.engine.is_running() || self.resume_pending {
            debug!("tap ignored in phase {}", self.phase);
            return false;
        }
        self.input_enabled = false;
        if self.config.supports_resume && self.angle != 0.0 {
            self.start_rewind(0);
        } else {
            self.start_fresh_spin();
        }
        true
    }

    /// Takes a slider fraction in `[0, 1]`; larger values shrink the inset.
    pub fn set_scale(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.scale = 1.0 - value.clamp(0.0, 1.0);
        self.invalidated = true;
    }

    /// Inset applied on each side of the wheel's bounding box.
    pub fn inset(&self, orientation: Orientation) -> f32 {
        let margin = match orientation {
            Orientation::Portrait => self.config.portrait_margin,
            Orientation::Landscape => self.config.landscape_margin,
        };
        margin * self.scale
    }

    pub fn render(&self, canvas: &mut impl ArcCanvas, width: f32, height: f32, orientation: Orientation) {
        let radius = width.min(height) / 2.0;
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        let inset = self.inset(orientation);
        let sweep = sweep_angle(self.segments.len());
        let offset = normalize_angle(self.angle);

        let wheel = Rect::new(
            center_x - radius + inset,
            center_y - radius + inset,
            center_x + radius - inset,
            center_y + radius - inset,
        );
        for segment in &self.segments {
            canvas.draw_arc(
                wheel,
                self.config.start_angle + segment.index as f32 * sweep + offset,
                sweep,
                segment.color,
            );
        }

        let pointer = Rect::new(
            center_x - POINTER_HALF_WIDTH,
            center_y - radius - POINTER_TOP_OVERHANG + inset,
            center_x + POINTER_HALF_WIDTH,
            center_y - radius + POINTER_DEPTH + inset,
        );
        canvas.draw_arc(pointer, self.config.start_angle - sweep / 2.0, sweep, Color::BLACK);
    }

    /// Advances the running animation by `delta_ms`. Returns whether the
    /// wheel moved and needs a redraw.
    pub fn tick(&mut self, delta_ms: i64) -> bool {
        let Some(frame) = self.engine.advance(delta_ms) else {
            return false;
        };
        self.angle = frame.angle;
        self.elapsed_ms = frame.elapsed_ms;
        self.invalidated = true;

        if frame.completed {
            match frame.kind {
                RunKind::Rewind => self.finish_rewind(),
                RunKind::Spin => self.finish_spin(),
            }
        }
        true
    }

    pub fn on_mount(&mut self) {
        self.mounted = true;
        if !std::mem::take(&mut self.resume_pending) {
            return;
        }
        match (self.phase, self.spin_to) {
            (Phase::Rewinding, _) => {
                debug!("resuming rewind at {}ms", self.elapsed_ms);
                self.start_rewind(self.elapsed_ms);
            }
            (Phase::Spinning, Some(target)) => {
                debug!("resuming spin to {} at {}ms", target, self.elapsed_ms);
                self.start_resumed_spin(target, self.elapsed_ms);
            }
            (Phase::Spinning, None) => {
                warn!("spin snapshot without a target, starting over");
                if self.angle != 0.0 {
                    self.start_rewind(0);
                } else {
                    self.start_fresh_spin();
                }
            }
            (Phase::Idle, _) => self.input_enabled = true,
        }
    }

    /// Cancels any run or pending resume without publishing a result.
    pub fn on_unmount(&mut self) {
        self.mounted = false;
        let cancelled = self.engine.cancel();
        if cancelled.is_some() || self.resume_pending {
            debug!("animation cancelled in phase {}", self.phase);
            self.resume_pending = false;
            self.phase = Phase::Idle;
            self.angle = 0.0;
            self.elapsed_ms = 0;
            self.spin_to = None;
            self.input_enabled = true;
            self.invalidated = true;
        }
    }

    pub fn serialize_state(&self) -> WheelSnapshot {
        WheelSnapshot {
            animation_status: self.phase.as_str().to_string(),
            angle: self.angle,
            elapsed_ms: self.elapsed_ms,
            spin_to: self.spin_to,
            scale: self.scale,
        }
    }

    /// Applies a snapshot. An in-flight phase is resumed on the next
    /// `on_mount`, or right away when already mounted.
    pub fn restore_state(&mut self, snapshot: &WheelSnapshot) {
        let was_active = self.engine.cancel().is_some() || self.resume_pending;
        if was_active {
            self.angle = 0.0;
        }
        self.resume_pending = false;
        self.invalidated = true;
        if snapshot.scale.is_finite() {
            self.scale = snapshot.scale.clamp(0.0, 1.0);
        }

        let phase = match snapshot.phase() {
            Ok(phase) if snapshot.angle.is_finite() => phase,
            Ok(_) => {
                warn!("snapshot angle {} is not finite, staying idle", snapshot.angle);
                self.settle_idle(self.angle);
                return;
            }
            Err(err) => {
                warn!("{}, staying idle at {}", err, self.angle);
                self.settle_idle(self.angle);
                return;
            }
        };

        if phase == Phase::Idle {
            self.settle_idle(snapshot.angle);
            return;
        }
        if !self.config.supports_resume {
            debug!("resume disabled, dropping {} snapshot", phase);
            self.settle_idle(0.0);
            return;
        }

        self.phase = phase;
        self.angle = snapshot.angle;
        self.elapsed_ms = snapshot.elapsed_ms.max(0);
        self.spin_to = match phase {
            Phase::Spinning => snapshot.spin_to.filter(|target| target.is_finite() && *target != 0.0),
            _ => None,
        };
        self.input_enabled = false;
        self.resume_pending = true;
        if self.mounted {
            self.on_mount();
        }
    }

    fn settle_idle(&mut self, angle: f32) {
        self.phase = Phase::Idle;
        self.angle = angle;
        self.elapsed_ms = 0;
        self.spin_to = None;
        self.input_enabled = true;
    }

    fn start_rewind(&mut self, elapsed_ms: i64) {
        self.phase = Phase::Rewinding;
        self.elapsed_ms = elapsed_ms;
        self.spin_to = None;
        let run = Run::new(
            RunKind::Rewind,
            self.angle,
            self.config.rewind_target,
            self.config.rewind_duration_ms - elapsed_ms,
        )
        .resumed_at(elapsed_ms);
        self.engine.start(run);
    }

    fn start_fresh_spin(&mut self) {
        let target = self.targets.next_target(self.config.spin_range());
        debug!("spinning to {}", target);
        self.phase = Phase::Spinning;
        self.angle = 0.0;
        self.elapsed_ms = 0;
        self.spin_to = Some(target);
        let run = Run::new(RunKind::Spin, 0.0, target, self.config.spin_duration_ms)
            .with_delay(self.config.spin_start_delay_ms);
        self.engine.start(run);
    }

    fn start_resumed_spin(&mut self, target: f32, elapsed_ms: i64) {
        self.phase = Phase::Spinning;
        self.elapsed_ms = elapsed_ms;
        self.spin_to = Some(target);
        let run = Run::new(
            RunKind::Spin,
            self.angle,
            target,
            self.config.spin_duration_ms - elapsed_ms,
        )
        .resumed_at(elapsed_ms);
        self.engine.start(run);
    }

    fn finish_rewind(&mut self) {
        debug!("rewind complete");
        self.angle = 0.0;
        self.start_fresh_spin();
    }

    fn finish_spin(&mut self) {
        let value = self
            .segment_at_angle()
            .map(|segment| segment.value)
            .unwrap_or_default();
        info!("wheel stopped at {} -> {:?}", normalize_angle(self.angle), value);
        self.settle_idle(self.angle);
        self.result.publish(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FixedTarget, RandomTargets};
    use crate::render::ArcCommand;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME_MS: i64 = 16;

    fn widget(target: f32) -> WheelWidget {
        let mut widget = WheelWidget::with_defaults(FixedTarget(target));
        widget.on_mount();
        widget
    }

    fn record_results(widget: &mut WheelWidget) -> Rc<RefCell<Vec<WheelValue>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        widget.subscribe_result(move |value| sink.borrow_mut().push(*value));
        seen
    }

    fn run_frames(widget: &mut WheelWidget, total_ms: i64) -> Vec<Phase> {
        let mut phases = Vec::new();
        let mut remaining = total_ms;
        while remaining > 0 {
            let step = remaining.min(FRAME_MS);
            widget.tick(step);
            phases.push(widget.phase());
            remaining -= step;
        }
        phases
    }

    fn run_until_idle(widget: &mut WheelWidget) -> Vec<Phase> {
        let mut phases = Vec::new();
        for _ in 0..10_000 {
            if !widget.is_animating() {
                break;
            }
            widget.tick(FRAME_MS);
            phases.push(widget.phase());
        }
        phases
    }

    #[test]
    fn test_spin_from_zero_lands_on_picture() {
        let mut widget = widget(1500.0);
        let results = record_results(&mut widget);

        assert!(widget.on_tap());
        assert_eq!(widget.phase(), Phase::Spinning);
        let phases = run_until_idle(&mut widget);

        assert!(!phases.contains(&Phase::Rewinding));
        assert_eq!(widget.phase(), Phase::Idle);
        assert_eq!(widget.angle(), 1500.0);
        assert_eq!(normalize_angle(widget.angle()), 60.0);
        assert_eq!(widget.segment_at_angle().unwrap().index, 1);
        assert_eq!(widget.current_result(), WheelValue::Picture);
        assert_eq!(*results.borrow(), vec![WheelValue::Picture]);
        assert!(widget.is_input_enabled());
    }

    #[test]
    fn test_spin_respects_start_delay_and_duration() {
        let mut widget = widget(1500.0);
        widget.on_tap();

        run_frames(&mut widget, 1000);
        assert_eq!(widget.angle(), 0.0);
        assert_eq!(widget.elapsed_ms(), 0);

        run_frames(&mut widget, 2500);
        assert!((widget.angle() - 750.0).abs() < 0.5);
        assert_eq!(widget.elapsed_ms(), 2500);

        run_frames(&mut widget, 2500);
        assert_eq!(widget.phase(), Phase::Idle);
        assert_eq!(widget.angle(), 1500.0);
    }

    #[test]
    fn test_second_tap_rewinds_first() {
        let mut widget = widget(1500.0);
        let results = record_results(&mut widget);
        widget.on_tap();
        run_until_idle(&mut widget);

        assert!(widget.on_tap());
        assert_eq!(widget.phase(), Phase::Rewinding);

        run_frames(&mut widget, 1000);
        assert!(widget.angle() > 1500.0 && widget.angle() < 2160.0);

        run_frames(&mut widget, 1000);
        assert_eq!(widget.phase(), Phase::Spinning);
        assert_eq!(widget.angle(), 0.0);

        let phases = run_until_idle(&mut widget);
        assert!(!phases.contains(&Phase::Rewinding));
        assert_eq!(*results.borrow(), vec![WheelValue::Picture, WheelValue::Picture]);
    }

    #[test]
    fn test_tap_during_animation_is_noop() {
        let mut widget = widget(1500.0);
        widget.on_tap();
        run_frames(&mut widget, 2000);
        let before = widget.serialize_state();

        assert!(!widget.on_tap());
        assert_eq!(widget.serialize_state(), before);
        assert!(!widget.is_input_enabled());
    }

    #[test]
    fn test_simple_variant_never_rewinds() {
        let mut widget = WheelWidget::new(WheelConfig::simple(), FixedTarget(1200.0)).unwrap();
        widget.on_mount();
        widget.on_tap();
        run_until_idle(&mut widget);
        assert_eq!(widget.angle(), 1200.0);

        widget.on_tap();
        assert_eq!(widget.phase(), Phase::Spinning);
        assert_eq!(widget.angle(), 0.0);
    }

    #[test]
    fn test_resume_mid_spin_matches_uninterrupted() {
        let mut uninterrupted = widget(1777.0);
        uninterrupted.on_tap();
        run_until_idle(&mut uninterrupted);

        let mut original = widget(1777.0);
        original.on_tap();
        run_frames(&mut original, 1000 + 2000);
        let snapshot = original.serialize_state();
        let angle_at_snapshot = original.angle();
        original.on_unmount();

        let mut restored = WheelWidget::new(WheelConfig::default(), FixedTarget(9.0)).unwrap();
        let results = record_results(&mut restored);
        restored.restore_state(&snapshot);
        assert_eq!(restored.phase(), Phase::Spinning);
        assert!(!restored.is_animating());

        restored.on_mount();
        assert!(restored.is_animating());
        // no wind-up pause on resume
        restored.tick(500);
        assert!(restored.angle() > angle_at_snapshot);

        run_until_idle(&mut restored);
        assert!((restored.angle() - uninterrupted.angle()).abs() < 1e-3);
        assert_eq!(restored.current_result(), uninterrupted.current_result());
        assert_eq!(results.borrow().len(), 1);
    }

    #[test]
    fn test_resume_keeps_timeline_position() {
        let mut widget = widget(2000.0);
        widget.on_tap();
        run_frames(&mut widget, 1000 + 1000);
        let snapshot = widget.serialize_state();
        assert_eq!(snapshot.elapsed_ms, 1000);

        widget.on_unmount();
        widget.restore_state(&snapshot);
        widget.on_mount();
        run_frames(&mut widget, 1000);
        assert_eq!(widget.elapsed_ms(), 2000);
        // linear: 2000 * 2/5
        assert!((widget.angle() - 800.0).abs() < 0.5);

        // a second suspend still lands on the same timeline
        let snapshot = widget.serialize_state();
        widget.on_unmount();
        widget.restore_state(&snapshot);
        widget.on_mount();
        let remaining = run_until_idle(&mut widget).len() as i64 * FRAME_MS;
        assert!((3000..3000 + FRAME_MS).contains(&remaining));
        assert_eq!(widget.angle(), 2000.0);
    }

    #[test]
    fn test_resume_mid_rewind_chains_into_spin() {
        let mut widget = widget(1500.0);
        widget.on_tap();
        run_until_idle(&mut widget);
        widget.on_tap();
        run_frames(&mut widget, 1200);
        let snapshot = widget.serialize_state();
        assert_eq!(snapshot.animation_status, "BACK_SPIN");
        assert_eq!(snapshot.elapsed_ms, 1200);

        let mut restored = WheelWidget::new(WheelConfig::default(), FixedTarget(1100.0)).unwrap();
        restored.restore_state(&snapshot);
        restored.on_mount();
        run_frames(&mut restored, 800);
        assert_eq!(restored.phase(), Phase::Spinning);
        assert_eq!(restored.spin_to(), Some(1100.0));

        run_until_idle(&mut restored);
        assert_eq!(restored.angle(), 1100.0);
        assert_eq!(restored.current_result(), WheelValue::Text);
    }

    #[test]
    fn test_unmount_mid_spin_publishes_nothing() {
        let mut widget = widget(1500.0);
        let results = record_results(&mut widget);
        widget.on_tap();
        run_frames(&mut widget, 1000 + 2000);

        widget.on_unmount();
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.is_animating());
        assert!(!widget.tick(10_000));
        assert!(results.borrow().is_empty());
        assert_eq!(widget.current_result(), WheelValue::None);

        widget.on_mount();
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.is_animating());
        assert!(widget.on_tap());
    }

    #[test]
    fn test_restore_idle_starts_nothing() {
        let mut widget = widget(1500.0);
        widget.restore_state(&WheelSnapshot {
            animation_status: "NONE".to_string(),
            angle: 1500.0,
            ..WheelSnapshot::default()
        });
        assert!(!widget.is_animating());
        assert_eq!(widget.angle(), 1500.0);
        assert!(widget.on_tap());
        assert_eq!(widget.phase(), Phase::Rewinding);
    }

    #[test]
    fn test_unknown_phase_recovers_to_idle() {
        let mut widget = widget(1500.0);
        widget.on_tap();
        run_frames(&mut widget, 1000 + 5000);
        assert_eq!(widget.angle(), 1500.0);

        widget.restore_state(&WheelSnapshot {
            animation_status: "WOBBLE".to_string(),
            angle: 777.0,
            elapsed_ms: 300,
            spin_to: Some(1200.0),
            scale: 0.5,
        });
        assert_eq!(widget.phase(), Phase::Idle);
        assert_eq!(widget.angle(), 1500.0);
        assert!(!widget.is_animating());
        assert!(widget.is_input_enabled());
    }

    #[test]
    fn test_elapsed_past_duration_completes_once() {
        let mut widget = widget(1500.0);
        let results = record_results(&mut widget);
        widget.restore_state(&WheelSnapshot {
            animation_status: "SPIN".to_string(),
            angle: 1490.0,
            elapsed_ms: 7000,
            spin_to: Some(1500.0),
            scale: 0.5,
        });
        assert!(widget.tick(0));
        assert_eq!(widget.phase(), Phase::Idle);
        assert_eq!(*results.borrow(), vec![WheelValue::Picture]);
        assert!(!widget.tick(0));
    }

    #[test]
    fn test_scale_inverts_slider() {
        let mut widget = widget(1500.0);
        widget.set_scale(0.3);
        assert!((widget.scale() - 0.7).abs() < 1e-6);

        let mut canvas: Vec<ArcCommand> = Vec::new();
        widget.render(&mut canvas, 800.0, 1200.0, Orientation::Portrait);
        let inset = 120.0 * 0.7;
        let wheel = canvas[0].oval;
        assert!((wheel.left - inset).abs() < 1e-3);
        assert!((wheel.top - (200.0 + inset)).abs() < 1e-3);

        canvas.clear();
        widget.render(&mut canvas, 1200.0, 800.0, Orientation::Landscape);
        assert!((widget.inset(Orientation::Landscape) - 80.0 * 0.7).abs() < 1e-3);
        assert!((canvas[0].oval.left - (200.0 + 80.0 * 0.7)).abs() < 1e-3);

        widget.set_scale(f32::NAN);
        widget.set_scale(4.0);
        assert_eq!(widget.scale(), 0.0);
    }

    #[test]
    fn test_render_draws_segments_and_pointer() {
        let mut widget = widget(1500.0);
        widget.on_tap();
        run_until_idle(&mut widget);
        assert!(widget.take_invalidated());
        assert!(!widget.take_invalidated());

        let mut canvas: Vec<ArcCommand> = Vec::new();
        widget.render(&mut canvas, 1000.0, 1000.0, Orientation::Portrait);
        assert_eq!(canvas.len(), 8);
        let sweep = 360.0 / 7.0;
        for (i, command) in canvas[..7].iter().enumerate() {
            let expected = -90.0 + i as f32 * sweep + 60.0;
            assert!((command.start_angle - expected).abs() < 1e-3);
            assert_eq!(command.color, widget.segments()[i].color);
        }
        let pointer = canvas[7];
        assert_eq!(pointer.color, Color::BLACK);
        assert!((pointer.start_angle - (-90.0 - sweep / 2.0)).abs() < 1e-3);
        assert_eq!(pointer.oval.width(), 200.0);
        // rendering leaves the state alone
        assert!(!widget.take_invalidated());
    }

    #[test]
    fn test_seeded_spins_are_repeatable() {
        let spin = |seed| {
            let mut widget = WheelWidget::new(WheelConfig::default(), RandomTargets::seeded(seed)).unwrap();
            widget.on_mount();
            widget.on_tap();
            let target = widget.spin_to().unwrap();
            run_until_idle(&mut widget);
            (target, widget.current_result())
        };
        let (target, value) = spin(11);
        assert!((1081.0..=2160.0).contains(&target));
        assert_eq!(spin(11), (target, value));
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = WheelConfig {
            spin_target_min: 10,
            spin_target_max: 5,
            ..WheelConfig::default()
        };
        assert!(matches!(
            WheelWidget::new(config, FixedTarget(1.0)),
            Err(WheelError::InvalidConfig(_))
        ));
        assert!(WheelWidget::with_segments(WheelConfig::default(), Vec::new(), FixedTarget(1.0)).is_err());
    }
}
