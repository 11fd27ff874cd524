use super::{Application, Choice, LessonContent, LessonKind};
use crate::model::{PassThreshold, QuizQuestion};

pub(super) static CONTENT: LessonContent = LessonContent {
    kind: LessonKind::SeismicWaves,
    title: "P-Waves vs S-Waves",
    tagline: "Two kinds of earthquake waves let us see inside a planet nobody can visit.",
    hook: &[
        "When an earthquake strikes, seismometers around the world record two distinct jolts.",
        "The first arrives fast and pushes the ground back and forth. The second arrives later and shakes it side to side.",
        "Some stations on the far side of the Earth never feel the second jolt at all. Why?",
    ],
    prediction: Choice {
        prompt: "Which wave do you think reaches a distant seismometer first?",
        options: &[
            "The P-wave (push-pull)",
            "The S-wave (side-to-side)",
            "Both arrive together",
        ],
        correct: 0,
    },
    play_intro: "Pick a wave type and send it through solid rock. Watch how each particle moves.",
    review: &[
        "P-waves compress and stretch the rock along the direction of travel.",
        "S-waves shear the rock perpendicular to the direction of travel.",
        "Rock resists compression more strongly than shear, so P-waves travel faster: about 6 km/s against 3.5 km/s in the crust.",
    ],
    twist: Choice {
        prompt: "What happens when an S-wave reaches a liquid layer, like the Earth's outer core?",
        options: &[
            "It speeds up",
            "It dies out because liquids cannot be sheared",
            "It turns into a P-wave with no loss",
        ],
        correct: 1,
    },
    twist_play_intro: "Switch the medium to liquid and send both wave types through it.",
    twist_review: &[
        "A liquid flows instead of springing back when sheared, so there is nothing to carry an S-wave.",
        "P-waves still pass through liquid, only slower.",
        "The missing S-waves on the far side of the planet form a shadow zone, the first proof that the outer core is liquid.",
    ],
    applications: &[
        Application {
            title: "Earthquake early warning",
            description: "Detecting the fast P-wave buys seconds of warning before the damaging S-wave arrives.",
            stats: &[("Warning time", "5 to 60 s"), ("Trains stopped", "automatically")],
        },
        Application {
            title: "Mapping Earth's core",
            description: "The S-wave shadow zone beyond 104° from an epicentre reveals the liquid outer core.",
            stats: &[("Shadow zone", "104° to 140°"), ("Core radius", "about 3,480 km")],
        },
        Application {
            title: "Oil and gas exploration",
            description: "Controlled vibrations send waves into the ground; echoes map buried rock layers.",
            stats: &[("Depth imaged", "up to 10 km"), ("Survey channels", "thousands")],
        },
        Application {
            title: "Nuclear test monitoring",
            description: "Global seismic networks distinguish explosions from earthquakes by their wave mix.",
            stats: &[("Stations", "170+ seismic"), ("Detection", "below magnitude 4")],
        },
    ],
    questions: &[
        QuizQuestion {
            prompt: "Which wave arrives first at a seismometer?",
            options: &["S-wave", "P-wave", "Surface wave", "They arrive together"],
            correct: 1,
            explanation: "P-waves are the fastest seismic waves.",
        },
        QuizQuestion {
            prompt: "How do particles move in a P-wave?",
            options: &[
                "Perpendicular to travel",
                "Along the direction of travel",
                "In circles",
                "They do not move",
            ],
            correct: 1,
            explanation: "P-waves are compressional (longitudinal).",
        },
        QuizQuestion {
            prompt: "How do particles move in an S-wave?",
            options: &[
                "Along the direction of travel",
                "Perpendicular to the direction of travel",
                "Only upward",
                "Randomly",
            ],
            correct: 1,
            explanation: "S-waves are shear (transverse) waves.",
        },
        QuizQuestion {
            prompt: "Why can S-waves not travel through liquids?",
            options: &[
                "Liquids are too dense",
                "Liquids cannot resist shear",
                "Liquids are too hot",
                "Liquids absorb all sound",
            ],
            correct: 1,
            explanation: "Without shear rigidity there is no restoring force for sideways motion.",
        },
        QuizQuestion {
            prompt: "What did the S-wave shadow zone reveal?",
            options: &[
                "The inner core is liquid",
                "The outer core is liquid",
                "The mantle is liquid",
                "The crust is floating",
            ],
            correct: 1,
            explanation: "S-waves vanish where their paths would cross the outer core.",
        },
        QuizQuestion {
            prompt: "Typical P-wave speed in crustal rock is about:",
            options: &["0.3 km/s", "6 km/s", "60 km/s", "300,000 km/s"],
            correct: 1,
            explanation: "Around 6 km/s, roughly twice the S-wave speed.",
        },
        QuizQuestion {
            prompt: "What happens to a P-wave entering the liquid outer core?",
            options: &["It stops", "It slows down and bends", "It becomes an S-wave", "It speeds up a lot"],
            correct: 1,
            explanation: "P-waves continue through liquid but slow down and refract.",
        },
        QuizQuestion {
            prompt: "Earthquake early warning systems rely on:",
            options: &[
                "Detecting the P-wave before the S-wave arrives",
                "Predicting quakes days ahead",
                "Measuring ocean tides",
                "Watching animal behaviour",
            ],
            correct: 0,
            explanation: "The speed difference opens a warning window.",
        },
        QuizQuestion {
            prompt: "The delay between P and S arrivals tells you:",
            options: &[
                "The quake's magnitude",
                "The distance to the epicentre",
                "The time of day",
                "The rock temperature",
            ],
            correct: 1,
            explanation: "The gap grows with distance because the waves travel at different speeds.",
        },
        QuizQuestion {
            prompt: "Which wave causes most of the side-to-side shaking that damages buildings?",
            options: &["P-wave", "S-wave", "Sound wave", "Radio wave"],
            correct: 1,
            explanation: "S-waves carry larger horizontal ground motion.",
        },
    ],
    pass_threshold: PassThreshold::SEVEN_OF_TEN,
    mastery: &[
        "P-waves push and pull along their path and arrive first.",
        "S-waves shake sideways, travel slower and cannot cross liquids.",
        "The S-wave shadow zone shows that Earth's outer core is liquid.",
    ],
};
