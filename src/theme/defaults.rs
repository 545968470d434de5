use super::{Animation, ColorToken, Keyframe, ThemeConfig};
use std::collections::BTreeMap;

fn color(light: &str, dark: &str) -> ColorToken {
    ColorToken {
        light: light.to_string(),
        dark: dark.to_string(),
    }
}

fn frame(offset: f64, properties: &[(&str, &str)]) -> Keyframe {
    Keyframe {
        offset,
        properties: properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub(super) fn builtin() -> ThemeConfig {
    let colors = [
        ("background", color("hsl(0 0% 100%)", "hsl(222 47% 7%)")),
        ("foreground", color("hsl(222 47% 11%)", "hsl(210 40% 98%)")),
        ("card", color("hsl(0 0% 100%)", "hsl(222 47% 10%)")),
        ("card-foreground", color("hsl(222 47% 11%)", "hsl(210 40% 98%)")),
        ("primary", color("hsl(221 83% 53%)", "hsl(217 91% 60%)")),
        ("primary-foreground", color("hsl(210 40% 98%)", "hsl(222 47% 11%)")),
        ("secondary", color("hsl(210 40% 96%)", "hsl(217 33% 17%)")),
        ("secondary-foreground", color("hsl(222 47% 11%)", "hsl(210 40% 98%)")),
        ("muted", color("hsl(210 40% 96%)", "hsl(217 33% 17%)")),
        ("muted-foreground", color("hsl(215 16% 47%)", "hsl(215 20% 65%)")),
        ("accent", color("hsl(210 40% 96%)", "hsl(217 33% 17%)")),
        ("destructive", color("hsl(0 84% 60%)", "hsl(0 63% 31%)")),
        ("success", color("hsl(142 71% 45%)", "hsl(142 69% 58%)")),
        ("warning", color("hsl(38 92% 50%)", "hsl(48 96% 53%)")),
        ("info", color("hsl(199 89% 48%)", "hsl(198 93% 60%)")),
        ("border", color("hsl(214 32% 91%)", "hsl(217 33% 17%)")),
        ("input", color("hsl(214 32% 91%)", "hsl(217 33% 17%)")),
        ("ring", color("hsl(221 83% 53%)", "hsl(224 76% 48%)")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let animations = [
        (
            "accordion-down",
            Animation {
                duration: "200ms".to_string(),
                easing: "ease-out".to_string(),
                keyframes: vec![
                    frame(0.0, &[("height", "0")]),
                    frame(1.0, &[("height", "var(--radix-accordion-content-height)")]),
                ],
            },
        ),
        (
            "accordion-up",
            Animation {
                duration: "200ms".to_string(),
                easing: "ease-out".to_string(),
                keyframes: vec![
                    frame(0.0, &[("height", "var(--radix-accordion-content-height)")]),
                    frame(1.0, &[("height", "0")]),
                ],
            },
        ),
        (
            "fade-in",
            Animation {
                duration: "300ms".to_string(),
                easing: "ease-out".to_string(),
                keyframes: vec![
                    frame(0.0, &[("opacity", "0")]),
                    frame(1.0, &[("opacity", "1")]),
                ],
            },
        ),
        (
            "slide-up",
            Animation {
                duration: "300ms".to_string(),
                easing: "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
                keyframes: vec![
                    frame(0.0, &[("opacity", "0"), ("transform", "translateY(8px)")]),
                    frame(1.0, &[("opacity", "1"), ("transform", "translateY(0)")]),
                ],
            },
        ),
        (
            "pulse-soft",
            Animation {
                duration: "2s".to_string(),
                easing: "ease-in-out".to_string(),
                keyframes: vec![
                    frame(0.0, &[("opacity", "1")]),
                    frame(0.5, &[("opacity", "0.6")]),
                    frame(1.0, &[("opacity", "1")]),
                ],
            },
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    ThemeConfig {
        colors,
        radius: table(&[
            ("lg", "0.5rem"),
            ("md", "calc(0.5rem - 2px)"),
            ("sm", "calc(0.5rem - 4px)"),
        ]),
        durations: table(&[("fast", "150ms"), ("normal", "250ms"), ("slow", "400ms")]),
        easings: table(&[
            ("standard", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("emphasized", "cubic-bezier(0.2, 0, 0, 1)"),
            ("decelerate", "cubic-bezier(0, 0, 0.2, 1)"),
        ]),
        animations,
        shadows: table(&[
            ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
            ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
            ("glow", "0 0 20px hsl(221 83% 53% / 0.35)"),
        ]),
    }
}
