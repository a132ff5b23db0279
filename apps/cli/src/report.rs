use serde_json::{Value, json};
use spectrum_core::presets;
use spectrum_core::svg::{SvgOptions, to_svg};
use spectrum_core::{RenderedSpectrum, Score, TraitSet, label_offset, trait_color};

/// A command result: structured data for `--json`, plain text otherwise.
pub struct Output {
    pub data: Value,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Svg,
    Json,
    Summary,
}

pub fn render_output(
    set: &TraitSet,
    scene: &RenderedSpectrum,
    format: Format,
    options: &SvgOptions,
) -> anyhow::Result<Output> {
    let output = match format {
        Format::Svg => {
            let svg = to_svg(scene, options)?;
            Output {
                data: Value::String(svg.clone()),
                text: svg,
            }
        }
        Format::Json => {
            let data = serde_json::to_value(scene)?;
            let text = serde_json::to_string_pretty(&data)?;
            Output { data, text }
        }
        Format::Summary => summary(set, scene),
    };
    Ok(output)
}

fn summary(set: &TraitSet, scene: &RenderedSpectrum) -> Output {
    let traits: Vec<Value> = set
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            json!({
                "label": entry.label(),
                "score": entry.score().value(),
                "score_label": entry.score().label(),
                "color": trait_color(idx).hex(),
                "label_offset": label_offset(idx),
            })
        })
        .collect();

    let mut text = format!("Traits: {}\n{}\n", set.len(), scene.mean.label.text);
    for (idx, entry) in set.iter().enumerate() {
        text.push_str(&format!(
            "{:>3}. {:<24} {:>5}  {}\n",
            idx + 1,
            entry.label(),
            entry.score().label(),
            trait_color(idx).hex()
        ));
    }

    Output {
        data: json!({
            "count": set.len(),
            "mean": scene.mean_value(),
            "mean_label": scene.mean.label.text,
            "traits": traits,
        }),
        text: text.trim_end().to_string(),
    }
}

pub fn presets_output() -> Output {
    let mut text = String::new();
    let groups: Vec<Value> = presets::groups()
        .iter()
        .map(|group| {
            text.push_str(group.name);
            text.push('\n');
            let traits: Vec<Value> = group
                .entries()
                .map(|entry| {
                    text.push_str(&format!("  {:<18} {}\n", entry.label(), entry.score().label()));
                    json!({ "label": entry.label(), "score": entry.score().value() })
                })
                .collect();
            json!({ "name": group.name, "traits": traits })
        })
        .collect();

    Output {
        data: Value::Array(groups),
        text: text.trim_end().to_string(),
    }
}

pub fn scale_output() -> Output {
    let steps: Vec<Value> = Score::all()
        .map(|s| json!({ "value": s.value(), "label": s.label() }))
        .collect();
    let text = Score::all()
        .map(|s| format!("{:>5}  {}", format!("{:.1}", s.value()), s.label()))
        .collect::<Vec<_>>()
        .join("\n");
    Output {
        data: Value::Array(steps),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectrum_core::render;

    #[test]
    fn summary_reports_mean_and_colors() {
        let set = TraitSet::from_pairs([("Assertive", 4.0), ("Charismatic", 2.5), ("Ambitious", 3.5)])
            .unwrap();
        let scene = render(&set);
        let out = render_output(&set, &scene, Format::Summary, &SvgOptions::default()).unwrap();
        assert_eq!(out.data["mean_label"], "Mean: 3.3");
        assert_eq!(out.data["traits"][1]["color"], "#ff7f0e");
        assert!(out.text.contains("Mean: 3.3"));
    }

    #[test]
    fn scale_lists_all_steps() {
        let out = scale_output();
        assert_eq!(out.data.as_array().map(Vec::len), Some(21));
        assert_eq!(out.data[0]["label"], "5.0F");
        assert_eq!(out.text.lines().count(), 21);
    }

    #[test]
    fn presets_list_every_group() {
        let out = presets_output();
        assert_eq!(out.data.as_array().map(Vec::len), Some(5));
        assert!(out.text.starts_with("Emotional Traits"));
    }
}
