//! Generates the MagdyDiner final-project presentation deck.

use pitaya::{DeckBuilder, SlideSpec};
use std::path::PathBuf;
use std::process::ExitCode;

const OUTPUT_FILE: &str = "MagdyDiner_Presentation.pptx";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run() -> pitaya::Result<()> {
    let out_path: PathBuf = std::env::current_dir()?.join(OUTPUT_FILE);

    let deck = DeckBuilder::build(&deck_specs())?;
    deck.save(&out_path)?;

    println!("Saved {}", out_path.display());
    Ok(())
}

/// The deck content, one spec per slide in presentation order.
fn deck_specs() -> Vec<SlideSpec> {
    vec![
        SlideSpec::titled("MagdyDiner - Android App")
            .with_subtitle("Final Project Presentation\nPresenter: Magdy (Magdy1996)")
            .with_notes(
                "Introduce yourself, the repo and branch (main). Mention this presentation is a \
                 short 5-8 minute overview with a short demo.",
            ),
        SlideSpec::titled("Problem & Goals")
            .with_bullets([
                "Problem statement: the user pain the app solves",
                "Primary goals: usability, reliability, offline support",
                "Success criteria: stable build, complete main flows tested",
            ])
            .with_notes("Concise problem statement and measurable goals. Keep this slide to 20-30s."),
        SlideSpec::titled("Tech Stack & Tools")
            .with_bullets([
                "Languages: Kotlin (primary), Java (if present)",
                "Build: Gradle; IDE: Android Studio",
                "Key libraries: Retrofit, Coroutines, Room, Hilt, Jetpack components",
            ])
            .with_notes("Call out architecture pattern (MVVM) and why these libraries were chosen."),
        SlideSpec::titled("High-level Architecture")
            .with_bullets([
                "UI (Activities/Fragments) -> ViewModel -> Repository -> Data sources",
                "Remote API + Local DB (Room) with Repository merging data",
                "Single source of truth; ViewModel exposes StateFlow/LiveData",
            ])
            .with_notes(
                "Explain flow of data and where business logic lives. Use a quick diagram while \
                 speaking.",
            ),
        SlideSpec::titled("Key Components & Responsibilities")
            .with_bullets([
                "UI: render state, handle user input",
                "ViewModel: UI state, orchestrates calls to repositories",
                "Repository: abstracts data sources",
                "Data sources: API client (Retrofit), local DB (Room)",
            ])
            .with_notes(
                "Map important packages/classes and a short responsibility sentence for each.",
            ),
        SlideSpec::titled("Resource Wrapper (Loading/Success/Error)")
            .with_bullets([
                "Purpose: unify network/db result handling",
                "Typical shape: Resource.Success(data) / Resource.Error(msg) / Resource.Loading",
                "UI observes Resource and shows progress / content / error",
            ])
            .with_notes(
                "If you have a Resource.kt file, mention its package and show a short snippet \
                 during demo.",
            ),
        SlideSpec::titled("Demo Setup")
            .with_bullets([
                "Ensure emulator or physical device connected",
                "Build: ./gradlew assembleDebug",
                "Run from Android Studio or install APK from build/outputs/apk",
            ])
            .with_notes(
                "Explain how you will run the demo and what to look for (Logcat filter by \
                 package).",
            ),
        SlideSpec::titled("Live Demo Script")
            .with_bullets([
                "1) Launch app and show main screen",
                "2) Perform key flows (login / search / add favorite / offline behavior)",
                "3) Trigger an error to show error handling and Resource.Error",
            ])
            .with_notes(
                "Have emulator prepared, breakpoints set, network inspector available. Use a \
                 short, rehearsed script.",
            ),
        SlideSpec::titled("Tests & CI")
            .with_bullets([
                "Unit tests: ./gradlew test",
                "Instrumentation tests: ./gradlew connectedAndroidTest",
                "(Optional) CI: mention GitHub Actions or other if present",
            ])
            .with_notes("If you have tests, mention coverage and how to run them quickly."),
        SlideSpec::titled("Known Issues & Fixes")
            .with_bullets([
                "List 2-3 known bugs or limitations",
                "Explain how to reproduce and current mitigation/fix plan",
            ])
            .with_notes("Keep it honest and short; emphasize what you already fixed."),
        SlideSpec::titled("Deployment & Next Steps")
            .with_bullets([
                "Release steps: signed AAB, Play Console upload",
                "Planned improvements: performance, features, tests",
            ])
            .with_notes("Wrap up with realistic next steps and timeline."),
        SlideSpec::titled("Git Workflow & Demo Commands")
            .with_bullets([
                "Branch: git checkout -b presentation",
                "Build: ./gradlew assembleDebug",
                "Run tests: ./gradlew test",
            ])
            .with_notes("Quick commands slide so you can reference them during Q&A if needed."),
        SlideSpec::titled("Q & A")
            .with_bullets(["Thank you — questions welcome"])
            .with_notes("Invite questions and be ready to show code or logs for any ask."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_specs_build() {
        let specs = deck_specs();
        assert_eq!(specs.len(), 13);
        assert!(specs[0].subtitle.is_some());

        let deck = DeckBuilder::build(&specs).unwrap();
        assert_eq!(deck.slide_count(), 13);
    }
}
