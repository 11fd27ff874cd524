use super::{Application, Choice, LessonContent, LessonKind};
use crate::model::{PassThreshold, QuizQuestion};

pub(super) static CONTENT: LessonContent = LessonContent {
    kind: LessonKind::SolarCells,
    title: "Solar Cells as Light Detectors",
    tagline: "The same junction that powers a house can measure how bright a room is.",
    hook: &[
        "A solar panel on a roof makes electricity from sunlight.",
        "But a tiny solar cell inside a camera or a calculator is not there for power. It is there to sense light.",
        "How can one device be both a power plant and a light meter?",
    ],
    prediction: Choice {
        prompt: "If you double the light falling on a solar cell, what happens to the current it produces?",
        options: &[
            "The current roughly doubles",
            "The current stays the same",
            "The current drops",
            "The current quadruples",
        ],
        correct: 0,
    },
    play_intro: "Drag the intensity and angle sliders and watch the current and voltage respond.",
    review: &[
        "Each absorbed photon frees at most one electron, so current is proportional to the light that actually enters the cell.",
        "Tilting the cell spreads the same beam over a larger area: the useful light falls off as cos(angle).",
        "Voltage barely moves. It grows with the logarithm of the current, which is why current is the signal a light detector reads.",
    ],
    twist: Choice {
        prompt: "Blue photons carry more energy than red ones. Which colour gives the most current at the same brightness?",
        options: &[
            "Blue, because each photon has more energy",
            "Red, because the same power holds more photons",
            "All colours give the same current",
        ],
        correct: 1,
    },
    twist_play_intro: "Switch between red, green and blue light at the same intensity and compare the current.",
    twist_review: &[
        "At equal power, red light delivers more photons per second than blue light.",
        "Extra photon energy above the band gap is lost as heat, so one blue photon still frees only one electron.",
        "Detectors are therefore calibrated per wavelength: their responsivity peaks in the red and near infrared.",
    ],
    applications: &[
        Application {
            title: "Camera exposure meters",
            description: "A photodiode measures scene brightness so the camera can choose shutter speed and aperture.",
            stats: &[("Response time", "< 1 ms"), ("Dynamic range", "> 100 dB")],
        },
        Application {
            title: "Automatic street lights",
            description: "A small cell watches the sky and switches lamps on at dusk and off at dawn.",
            stats: &[("Switch level", "~10 lux"), ("Energy saved", "up to 40%")],
        },
        Application {
            title: "Optical communication",
            description: "Fibre-optic receivers turn flickering light back into data billions of times per second.",
            stats: &[("Data rate", "100+ Gbit/s"), ("Wavelength", "1550 nm")],
        },
        Application {
            title: "Pulse oximeters",
            description: "Red and infrared light through a fingertip reveal how much oxygen the blood carries.",
            stats: &[("Wavelengths", "660 / 940 nm"), ("Accuracy", "about 2%")],
        },
    ],
    questions: &[
        QuizQuestion {
            prompt: "What does a solar cell produce more of when more light hits it?",
            options: &["Current", "Resistance", "Heat only", "Magnetism"],
            correct: 0,
            explanation: "More photons free more electrons, so current rises with intensity.",
        },
        QuizQuestion {
            prompt: "A cell tilted 60 degrees away from the beam receives what fraction of head-on light?",
            options: &["All of it", "Half", "A quarter", "None"],
            correct: 1,
            explanation: "cos(60°) = 0.5.",
        },
        QuizQuestion {
            prompt: "At 90 degrees (light grazing the surface) the current is:",
            options: &["Maximum", "Half", "About zero", "Negative"],
            correct: 2,
            explanation: "cos(90°) = 0, so no light enters the cell face.",
        },
        QuizQuestion {
            prompt: "Why is current a better brightness signal than voltage?",
            options: &[
                "Voltage is always zero",
                "Current is proportional to light; voltage grows only logarithmically",
                "Current is easier to spell",
                "Voltage depends on colour only",
            ],
            correct: 1,
            explanation: "The open-circuit voltage saturates while current keeps tracking intensity.",
        },
        QuizQuestion {
            prompt: "In a completely dark room the cell voltage is:",
            options: &["About 0.45 V", "About 0.65 V", "Zero", "Infinite"],
            correct: 2,
            explanation: "No photons, no separated charge, no voltage.",
        },
        QuizQuestion {
            prompt: "At equal power, which light yields the most current in silicon?",
            options: &["Blue", "Green", "Red", "They are equal"],
            correct: 2,
            explanation: "Red light carries more photons per watt.",
        },
        QuizQuestion {
            prompt: "What happens to a blue photon's energy above the band gap?",
            options: &[
                "It frees a second electron",
                "It is lost as heat",
                "It is stored in the cell",
                "It is reflected as red light",
            ],
            correct: 1,
            explanation: "Hot carriers relax to the band edge and dump the excess as heat.",
        },
        QuizQuestion {
            prompt: "Which device uses red and infrared detectors on your fingertip?",
            options: &["Thermometer", "Pulse oximeter", "Stethoscope", "Blood pressure cuff"],
            correct: 1,
            explanation: "Oxygenated and deoxygenated blood absorb the two wavelengths differently.",
        },
        QuizQuestion {
            prompt: "Doubling the light intensity roughly does what to the current?",
            options: &["Halves it", "Doubles it", "Leaves it unchanged", "Squares it"],
            correct: 1,
            explanation: "Current is linear in photon flux.",
        },
        QuizQuestion {
            prompt: "A street light sensor switches lamps on when:",
            options: &[
                "Its current falls below a threshold",
                "Its temperature rises",
                "It detects motion",
                "Its voltage becomes negative",
            ],
            correct: 0,
            explanation: "Low light means low photocurrent, which trips the switch at dusk.",
        },
    ],
    pass_threshold: PassThreshold::SEVEN_OF_TEN,
    mastery: &[
        "Photocurrent is proportional to the light entering the cell: intensity × cos(angle).",
        "Voltage follows the logarithm of current, so detectors read current.",
        "Red light gives more current per watt than blue light.",
    ],
};
