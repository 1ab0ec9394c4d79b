use crate::config::DemoConfig;
use crate::page::{Page, RenderCycle, TRIGGER_LABEL};
use anyhow::Result;
use log::{debug, info, warn};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Rerun,
    PressTrigger,
    Quit,
}

impl Interaction {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "rerun" => Some(Interaction::Rerun),
            "a" | "apply" => Some(Interaction::PressTrigger),
            "q" | "quit" | "exit" => Some(Interaction::Quit),
            _ => None,
        }
    }
}

pub fn prompt() -> String {
    format!("[a] {}  [r] rerun  [q] quit", TRIGGER_LABEL)
}

/// Runs one fresh render cycle per interaction read from `input`.
///
/// The first cycle runs on start without the trigger. A cycle that fails is
/// logged and the session keeps reading; only `q` or a read error ends it.
/// Unknown input shows the prompt again. Returns the number of cycles run.
pub fn run_session<R, F>(config: &DemoConfig, input: R, mut on_page: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(&Page) -> Result<()>,
{
    let cycle = RenderCycle::new(config);
    let mut failed = usize::from(!run_cycle(&cycle, false, &mut on_page));
    let mut cycles = 1;

    for line in input.lines() {
        let line = line?;
        let interaction = match Interaction::parse(&line) {
            Some(interaction) => interaction,
            None => {
                debug!("Ignoring unknown input {:?}", line);
                println!("{}", prompt());
                continue;
            }
        };

        let trigger = match interaction {
            Interaction::Quit => break,
            Interaction::Rerun => false,
            Interaction::PressTrigger => true,
        };

        if !run_cycle(&cycle, trigger, &mut on_page) {
            failed += 1;
        }
        cycles += 1;
    }

    info!("Session ended after {} render cycles ({} failed)", cycles, failed);
    Ok(cycles)
}

fn run_cycle<F>(cycle: &RenderCycle<'_>, trigger: bool, on_page: &mut F) -> bool
where
    F: FnMut(&Page) -> Result<()>,
{
    match cycle.run(trigger).and_then(|page| on_page(&page)) {
        Ok(()) => true,
        Err(e) => {
            warn!("Render cycle failed: {:#}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_interactions() {
        assert_eq!(Interaction::parse(""), Some(Interaction::Rerun));
        assert_eq!(Interaction::parse(" A \n"), Some(Interaction::PressTrigger));
        assert_eq!(Interaction::parse("apply"), Some(Interaction::PressTrigger));
        assert_eq!(Interaction::parse("q"), Some(Interaction::Quit));
        assert_eq!(Interaction::parse("launch"), None);
    }

    #[test]
    fn test_each_interaction_is_a_fresh_cycle() {
        let config = DemoConfig::default();
        let input = Cursor::new("a\n\nbogus\na\nq\na\n");
        let mut pages = Vec::new();

        let cycles = run_session(&config, input, |page| {
            pages.push((page.triggered, page.charts().count(), page.day.clone()));
            Ok(())
        })
        .unwrap();

        assert_eq!(cycles, 4);
        let shape: Vec<_> = pages.iter().map(|(t, c, _)| (*t, *c)).collect();
        assert_eq!(shape, vec![(false, 2), (true, 3), (false, 2), (true, 3)]);
        assert!(pages.iter().all(|(_, _, day)| *day == pages[0].2));
    }

    #[test]
    fn test_failed_cycle_does_not_end_the_session() {
        let config = DemoConfig::default();
        let mut calls = 0;
        let mut rendered = Vec::new();

        let cycles = run_session(&config, Cursor::new("a\na\n\n"), |page| {
            calls += 1;
            if calls == 2 {
                anyhow::bail!("disk full");
            }
            rendered.push(page.triggered);
            Ok(())
        })
        .unwrap();

        assert_eq!(cycles, 4);
        assert_eq!(calls, 4);
        assert_eq!(rendered, vec![false, true, false]);
    }

    #[test]
    fn test_input_error_ends_the_session() {
        let config = DemoConfig::default();
        let input = Cursor::new(vec![b'a', b'\n', 0xff, b'\n']);

        let result = run_session(&config, input, |_| Ok(()));
        assert!(result.is_err());
    }
}
