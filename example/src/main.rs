//! Drives a volume panel through a scripted session and prints what a host
//! would render after each step.
//!
//! Run with `RUST_LOG=glide_controls=trace` to see the controls' own logs.

use std::{sync::Arc, time::Duration};

use glide_controls::{
    ActiveScope, MemoryPlayer, PlayerEvent, PlayerVolume, SliderArgs, StaticSupport, TrackLayout,
    VolumeControl, VolumeControlArgs,
};
use glide_ui::{
    CallbackWith, CursorEvent, InputSurface, Instant, KeyboardState, NamedKey, PointerSource,
    PressKeyEventType, Px, PxPosition,
};
use tracing::info;

const BAR_WIDTH: i32 = 20;

fn render(step: &str, control: &VolumeControl, track: &TrackLayout, bar: &ActiveScope) {
    let scale = track.extent.to_f32() / BAR_WIDTH as f32;
    let filled = (track.active_extent(control.value()).to_f32() / scale).round() as usize;
    let empty = (BAR_WIDTH as usize).saturating_sub(filled);
    println!(
        "{step:<28} [{}{}] {:>4} {:?}{}",
        "#".repeat(filled),
        "-".repeat(empty),
        control.accessibility_report().text_value,
        control.volume_level(),
        if bar.is_active() { " (active)" } else { "" },
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let track = TrackLayout::from_component(Px(120), Px(4), Px(6));
    let control_bar = ActiveScope::root("control-bar");
    control_bar.on_active_changed(CallbackWith::new(|active: bool| {
        info!(active, "control bar active state changed")
    }));

    let player = Arc::new(MemoryPlayer::default());
    let surface = InputSurface::new();
    let args = VolumeControlArgs::default()
        .slider(
            SliderArgs::default()
                .track(track)
                .accessibility_label("Volume Level"),
        )
        .on_value_changed(|value| info!(value, "volume changed"))
        .on_accessibility_report_changed(|report| {
            info!(text = %report.text_value, "accessibility value changed")
        });
    let mut control = VolumeControl::new(
        args,
        player.clone(),
        &StaticSupport::default(),
        surface.clone(),
        Some(&control_bar),
    )?;

    render("initial", &control, &track, &control_bar);

    let mouse = PointerSource::Mouse(PressKeyEventType::Left);
    let start = Instant::now();
    let at = |ms: u64| start + Duration::from_millis(ms);
    let x = |fraction: f32| {
        let offset = Px::saturating_from_f32(track.extent.to_f32() * fraction);
        PxPosition::new(track.start.saturating_add(offset), Px(4))
    };

    control.dispatch_cursor_event(&CursorEvent::pressed(at(0), x(0.6), mouse));
    render("press at 60%", &control, &track, &control_bar);

    for (i, fraction) in [0.5, 0.4, 0.3, 0.2].into_iter().enumerate() {
        control.dispatch_cursor_event(&CursorEvent::moved(at(4 * (i as u64 + 1)), x(fraction)));
    }
    render("fast drag (throttled)", &control, &track, &control_bar);

    if let Some(deadline) = control.next_deadline() {
        control.tick(deadline);
    }
    render("frame tick", &control, &track, &control_bar);

    control.dispatch_cursor_event(&CursorEvent::moved(at(80), x(0.0)));
    control.dispatch_cursor_event(&CursorEvent::released(at(90), x(0.0), mouse));
    render("drag to zero and release", &control, &track, &control_bar);
    info!(remembered = player.last_volume(), "player state after release");

    control.toggle_mute();
    render("mute toggle at zero", &control, &track, &control_bar);

    control.on_focus();
    let mut keyboard = KeyboardState::default();
    keyboard.push_event(NamedKey::ArrowUp);
    keyboard.push_event(NamedKey::ArrowUp);
    keyboard.push_event(NamedKey::ArrowLeft);
    let handled = control.process_keys(&mut keyboard);
    render(&format!("{handled} keys while focused"), &control, &track, &control_bar);
    control.on_blur();

    control.toggle_mute();
    render("mute toggle", &control, &track, &control_bar);

    player.set_muted(false);
    player.set_volume(0.35);
    control.handle_player_event(PlayerEvent::MutedChanged);
    render("host changed the player", &control, &track, &control_bar);

    control.teardown();
    info!(listeners = surface.listener_count(), "volume control torn down");
    Ok(())
}
