//! Prints the outline of a flex layout.
//!
//! ```text
//! flex-inspect card.json
//! cat card.json | flex-inspect
//! RUST_LOG=debug flex-inspect card.json
//! ```

use std::io::Read;
use std::process::ExitCode;

use flexwire::model::{BoxComponent, BubbleContainer, FlexComponent};
use flexwire::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

fn print_container(container: &FlexContainer) {
    println!("{}", container.kind());
    match container {
        FlexContainer::Bubble(bubble) => print_bubble(bubble, 1),
        FlexContainer::Carousel(carousel) => {
            for (i, bubble) in carousel.contents.iter().enumerate() {
                println!("  [{i}] bubble");
                print_bubble(bubble, 2);
            }
        }
    }
}

fn print_bubble(bubble: &BubbleContainer, depth: usize) {
    let blocks = [
        ("header", bubble.header.as_ref()),
        ("body", bubble.body.as_ref()),
        ("footer", bubble.footer.as_ref()),
    ];
    if let Some(hero) = bubble.hero.as_deref() {
        println!("{}hero:", indent(depth));
        print_component(hero, depth + 1);
    }
    for (name, block) in blocks {
        if let Some(block) = block {
            println!("{}{name}:", indent(depth));
            print_box(block, depth + 1);
        }
    }
    if let Some(action) = &bubble.action {
        println!("{}-> {}", indent(depth), describe_action(action));
    }
}

fn print_box(component: &BoxComponent, depth: usize) {
    let layout = component
        .layout
        .map(|layout| format!(" {layout:?}").to_lowercase())
        .unwrap_or_default();
    println!("{}box{layout}", indent(depth));
    for child in &component.contents {
        print_component(child, depth + 1);
    }
}

fn print_component(component: &FlexComponent, depth: usize) {
    match component {
        FlexComponent::Box(inner) => print_box(inner, depth),
        FlexComponent::Text(text) => println!("{}text {:?}", indent(depth), text.text),
        FlexComponent::Image(image) => println!("{}image {}", indent(depth), image.url),
        FlexComponent::Icon(icon) => println!("{}icon {}", indent(depth), icon.url),
        FlexComponent::Video(video) => {
            println!("{}video {}", indent(depth), video.url);
            println!("{}alt:", indent(depth + 1));
            print_component(&video.alt_content, depth + 2);
        }
        other => println!("{}{}", indent(depth), other.kind()),
    }
    if let Some(action) = component.action() {
        println!("{}-> {}", indent(depth + 1), describe_action(action));
    }
}

fn describe_action(action: &TemplateAction) -> String {
    let target = match action {
        TemplateAction::Uri(a) => a.uri.clone(),
        TemplateAction::Message(a) => format!("{:?}", a.text),
        TemplateAction::Postback(a) => a.data.clone(),
        TemplateAction::DatetimePicker(a) => a.data.clone(),
    };
    match action.label() {
        Some(label) => format!("{} [{label}] {target}", action.kind()),
        None => format!("{} {target}", action.kind()),
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn read_input() -> std::io::Result<Vec<u8>> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read(path),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            tracing::error!(error = %e, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    let decoder = FlexDecoder::builder().observer(TracingObserver).build();
    match decoder.decode(&input) {
        Ok(container) => {
            print_container(&container);
            ExitCode::SUCCESS
        }
        // The observer has already logged the details.
        Err(_) => ExitCode::FAILURE,
    }
}
