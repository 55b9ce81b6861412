use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::curve::Style;
use crate::scroll::host::SimulatedPage;

type Log = Rc<RefCell<Vec<String>>>;

struct Probe {
    id: &'static str,
    log: Log,
}

impl SectionRenderer<&'static str, f64> for Probe {
    fn id(&self) -> &&'static str {
        &self.id
    }

    fn on_mount(&mut self) {
        self.log.borrow_mut().push(format!("mount {}", self.id));
    }

    fn on_unmount(&mut self) {
        self.log.borrow_mut().push(format!("unmount {}", self.id));
    }

    fn render(&mut self, props: &SectionProps, _state: &f64) -> SectionFrame<&'static str> {
        SectionFrame {
            id: self.id,
            is_active: props.is_active,
            style: props.style(|t| Style {
                opacity: t,
                translate: Default::default(),
            }),
            items: Vec::new(),
        }
    }
}

const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn act(log: &Log) -> ActOrchestrator<&'static str, u32, f64> {
    let table = SegmentTable::new(IDS.iter().enumerate().map(|(i, id)| {
        (*id, i as f64 * 0.2, (i + 1) as f64 * 0.2)
    }))
    .unwrap();
    let renderers = IDS
        .iter()
        .map(|id| {
            Box::new(Probe {
                id,
                log: log.clone(),
            }) as Box<dyn SectionRenderer<&'static str, f64>>
        })
        .collect();
    let resolver = Resolver::new(|f: &ProgressFrame<'_, &'static str>, c: &u32| {
        f.motion_progress().get() + f64::from(*c)
    });
    ActOrchestrator::new("probe", table, resolver, 0, renderers).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

fn drain(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn rejects_mismatched_sections() {
    let log = Log::default();
    let table = SegmentTable::new([("a", 0.0, 0.5), ("b", 0.5, 1.0)]).unwrap();
    let renderers: Vec<Box<dyn SectionRenderer<&'static str, f64>>> = vec![
        Box::new(Probe {
            id: "b",
            log: log.clone(),
        }),
        Box::new(Probe {
            id: "a",
            log: log.clone(),
        }),
    ];
    let err = ActOrchestrator::new("bad", table, Resolver::new(|_, _: &()| 0.0), (), renderers)
        .unwrap_err();
    assert!(matches!(err, StoryError::Config(_)));

    let table = SegmentTable::new([("a", 0.0, 1.0)]).unwrap();
    let err = ActOrchestrator::new("short", table, Resolver::new(|_, _: &()| 0.0), (), Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("0 sections for 1 segments"));
}

#[test]
fn only_the_window_is_rendered() {
    let log = Log::default();
    let mut a = act(&log);

    let f = a.step(Progress::new(0.5), ReducedMotion::OFF);
    assert_eq!(f.active, "c");
    let ids: Vec<_> = f.sections.iter().map(|s| s.id).collect();
    assert_eq!(ids, ["b", "c", "d"]);
    assert_eq!(drain(&log), ["mount b", "mount c", "mount d"]);

    let f = a.step(Progress::new(0.0), ReducedMotion::OFF);
    let ids: Vec<_> = f.sections.iter().map(|s| s.id).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn unmount_happens_in_the_same_step() {
    let log = Log::default();
    let mut a = act(&log);
    a.step(Progress::new(0.1), ReducedMotion::OFF);
    drain(&log);

    a.step(Progress::new(0.5), ReducedMotion::OFF);
    assert_eq!(drain(&log), ["unmount a", "mount c", "mount d"]);

    // Jumping far away tears everything down before mounting the new window.
    a.step(Progress::new(1.0), ReducedMotion::OFF);
    assert_eq!(drain(&log), ["unmount b", "unmount c", "mount e"]);
    assert_eq!(a.mount_window(), Some(MountWindow::new(4, 5)));
}

#[test]
fn repeated_steps_are_memoized_and_identical() {
    let log = Log::default();
    let mut a = act(&log);
    let first = a.step(Progress::new(0.33), ReducedMotion::OFF);
    let second = a.step(Progress::new(0.33), ReducedMotion::OFF);
    assert_eq!(first, second);
    assert_eq!(a.resolver().evaluations(), 1);
    assert_eq!(drain(&log).len(), 3);
}

#[test]
fn outgoing_section_gets_handoff() {
    struct Capture(&'static str, Rc<RefCell<Vec<SectionProps>>>);
    impl SectionRenderer<&'static str, ()> for Capture {
        fn id(&self) -> &&'static str {
            &self.0
        }
        fn render(&mut self, props: &SectionProps, _: &()) -> SectionFrame<&'static str> {
            self.1.borrow_mut().push(*props);
            SectionFrame {
                id: self.0,
                is_active: props.is_active,
                style: Style::SHOWN,
                items: Vec::new(),
            }
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let table = SegmentTable::new([("a", 0.0, 0.5), ("b", 0.5, 1.0)]).unwrap();
    let renderers: Vec<Box<dyn SectionRenderer<&'static str, ()>>> = vec![
        Box::new(Capture("a", seen.clone())),
        Box::new(Capture("b", seen.clone())),
    ];
    let mut a = ActOrchestrator::new("h", table, Resolver::new(|_, _: &()| ()), (), renderers)
        .unwrap();
    a.step(Progress::new(0.75), ReducedMotion::OFF);
    let seen = seen.borrow();
    assert_eq!(seen[0].handoff, Some(0.5));
    assert!(!seen[0].is_active);
    assert_eq!(seen[1].handoff, None);
    assert!(seen[1].is_active);
}

#[test]
fn interactions_invalidate_and_hooks_see_previous_progress() {
    let log = Log::default();
    let crossings = Rc::new(RefCell::new(Vec::new()));
    let seen = crossings.clone();
    let mut a = act(&log).with_carry_hook(move |carry, frame, prev| {
        let now = frame.progress().get();
        if prev.is_some_and(|p| p.get() < 0.6 && now >= 0.6) {
            seen.borrow_mut().push(now);
            carry.update(|c| *c += 1);
        }
    });

    assert!(approx(a.step(Progress::new(0.5), ReducedMotion::OFF).state, 0.5));
    assert!(approx(a.step(Progress::new(0.7), ReducedMotion::OFF).state, 1.7));
    // Scrolling back and forth past the edge triggers again only on forward crossings.
    a.step(Progress::new(0.65), ReducedMotion::OFF);
    a.step(Progress::new(0.4), ReducedMotion::OFF);
    a.step(Progress::new(0.8), ReducedMotion::OFF);
    assert_eq!(*crossings.borrow(), [0.7, 0.8]);
    assert_eq!(*a.carry(), 2);

    a.interact(|c| *c = 10);
    assert!(approx(a.step(Progress::new(0.8), ReducedMotion::OFF).state, 10.8));
}

#[test]
fn reduced_motion_uses_segment_end_states() {
    let log = Log::default();
    let mut a = act(&log);
    let f = a.step(Progress::new(0.3), ReducedMotion::ON);
    assert!(approx(f.state, 0.4));
    for s in &f.sections {
        let expected = if s.is_active { 1.0 } else { 0.0 };
        assert_eq!(s.style.opacity, expected);
    }
}

#[test]
fn host_driven_lifecycle() {
    let log = Log::default();
    let mut a = act(&log);
    let mut page = SimulatedPage::new(1000.0);
    page.push_spacer(1000.0);
    let c = page.push_container(3000.0);
    page.push_spacer(1000.0);

    assert!(a.on_frame(&page, ReducedMotion::OFF).is_none());
    a.attach(&mut page, c);
    assert!(a.is_attached());
    assert!(a.has_pending_frame());
    page.take_frames();
    let f = a.on_frame(&page, ReducedMotion::OFF).unwrap();
    assert_eq!(f.progress, Progress::ZERO);

    page.scroll_to(2000.0);
    assert!(a.on_scroll(&mut page));
    assert!(!a.on_scroll(&mut page));
    assert!(a.has_pending_frame());
    page.take_frames();

    let f = a.on_frame(&page, ReducedMotion::OFF).unwrap();
    assert_eq!(f.progress.get(), 0.5);
    assert_eq!(f.active, "c");
    assert!(!a.has_pending_frame());

    drain(&log);
    a.detach(&mut page);
    assert_eq!(drain(&log), ["unmount b", "unmount c", "unmount d"]);
    assert_eq!(page.listener_count(), 0);
    assert!(!a.is_attached());
    a.detach(&mut page);
    assert!(drain(&log).is_empty());
}

#[test]
fn reattach_measures_the_new_container() {
    let log = Log::default();
    let mut a = act(&log);
    let mut page = SimulatedPage::new(1000.0);
    page.push_spacer(1000.0);
    let first = page.push_container(3000.0);
    let second = page.push_container(3000.0);
    page.push_spacer(1000.0);
    page.scroll_to(2000.0);

    a.attach(&mut page, first);
    page.take_frames();
    assert_eq!(a.on_frame(&page, ReducedMotion::OFF).unwrap().progress.get(), 0.5);

    a.detach(&mut page);
    a.attach(&mut page, second);
    page.take_frames();
    let f = a.on_frame(&page, ReducedMotion::OFF).unwrap();
    assert_eq!(f.progress, Progress::ZERO);
    assert_eq!(page.listener_count(), 1);

    // Switching without a detach releases the old listener too.
    a.attach(&mut page, first);
    assert_eq!(page.listener_count(), 1);
    page.take_frames();
    assert_eq!(a.on_frame(&page, ReducedMotion::OFF).unwrap().progress.get(), 0.5);
}
