use dioxus::prelude::*;
use lesson_core::physics::{Medium, WaveType, Wavelength};

use crate::vm::{LessonIntent, PARTICLE_COUNT, SeismicReadoutVm, SolarReadoutVm, WaveFrameVm};

const DIAGRAM_WIDTH: usize = PARTICLE_COUNT * 40;

//
// ─── SOLAR ─────────────────────────────────────────────────────────────────────
//

#[component]
pub(super) fn SolarLab(
    readout: SolarReadoutVm,
    twist: bool,
    on_intent: Callback<LessonIntent>,
) -> Element {
    let meter_width = format!("width: {:.0}%", readout.meter_pct);
    rsx! {
        div { class: "lab lab--solar",
            label { class: "lab-control",
                span { "Light intensity: {readout.intensity_pct}%" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: "{readout.intensity_pct}",
                    oninput: move |evt| {
                        if let Ok(pct) = evt.value().parse::<u8>() {
                            on_intent.call(LessonIntent::Intensity(pct));
                        }
                    },
                }
            }
            label { class: "lab-control",
                span { "Angle from straight on: {readout.angle_deg}°" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "90",
                    value: "{readout.angle_deg}",
                    oninput: move |evt| {
                        if let Ok(deg) = evt.value().parse::<u8>() {
                            on_intent.call(LessonIntent::Angle(deg));
                        }
                    },
                }
            }
            if twist {
                div { class: "lab-toggle",
                    for wavelength in Wavelength::ALL {
                        button {
                            key: "{wavelength.label()}",
                            class: if readout.wavelength == wavelength { "toggle toggle--on" } else { "toggle" },
                            onclick: move |_| on_intent.call(LessonIntent::Wavelength(wavelength)),
                            "{wavelength.label()}"
                        }
                    }
                }
            }
            div { class: "meter",
                div { class: "meter-fill", style: "{meter_width}" }
            }
            p { class: "readout", "{readout.current_text}" }
            p { class: "readout", "{readout.voltage_text}" }
        }
    }
}

//
// ─── SEISMIC ───────────────────────────────────────────────────────────────────
//

#[component]
pub(super) fn SeismicLab(
    readout: SeismicReadoutVm,
    frame: WaveFrameVm,
    twist: bool,
    on_intent: Callback<LessonIntent>,
) -> Element {
    let view_box = format!("0 0 {DIAGRAM_WIDTH} 100");
    let front = format!("{:.1}", frame.front_x);
    rsx! {
        div { class: "lab lab--seismic",
            div { class: "lab-toggle",
                for wave_type in [WaveType::P, WaveType::S] {
                    button {
                        key: "{wave_type.label()}",
                        class: if readout.wave_type == wave_type { "toggle toggle--on" } else { "toggle" },
                        onclick: move |_| on_intent.call(LessonIntent::WaveType(wave_type)),
                        "{wave_type.label()}"
                    }
                }
            }
            if twist {
                div { class: "lab-toggle",
                    for medium in [Medium::Solid, Medium::Liquid] {
                        button {
                            key: "{medium.label()}",
                            class: if readout.medium == medium { "toggle toggle--on" } else { "toggle" },
                            onclick: move |_| on_intent.call(LessonIntent::Medium(medium)),
                            "{medium.label()}"
                        }
                    }
                }
            }
            button {
                id: "send-wave",
                class: "primary",
                disabled: frame.running,
                onclick: move |_| on_intent.call(LessonIntent::SendWave),
                "Send Wave"
            }
            svg {
                class: "wave-diagram",
                view_box: "{view_box}",
                line {
                    x1: "{front}",
                    y1: "0",
                    x2: "{front}",
                    y2: "100",
                    class: "wave-front",
                }
                for (index, particle) in frame.particles.iter().enumerate() {
                    circle {
                        key: "{index}",
                        cx: "{particle.x:.1}",
                        cy: "{particle.y:.1}",
                        r: "5",
                        class: "particle",
                    }
                }
            }
            p { class: "readout", "{readout.speed_text}" }
            p { class: "readout", "{readout.status_text}" }
            if frame.running || frame.progress_pct > 0 {
                p { class: "readout", "Wave progress: {frame.progress_pct}%" }
            }
        }
    }
}
