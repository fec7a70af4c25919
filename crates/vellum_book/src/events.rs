//! Public event vocabulary
//!
//! Every state-changing operation emits a named event. Consumers subscribe
//! per kind with [`crate::BookController::on`]; payloads are typed, and raw
//! gesture pass-throughs carry the full [`GestureEvent`].

use vellum_core::gesture::GestureEvent;

/// Discriminant for [`BookEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookEventKind {
    InitBefore,
    Init,
    InitAfter,
    Resize,
    BookOpenBefore,
    BookOpen,
    BookCloseBefore,
    BookClose,
    BookCloseAfter,
    PageFlipBefore,
    PageFlip,
    PageFlipAfter,
    ClickPageFirst,
    ClickPageLast,
    UpdateUi,
    Active,
    Enable,
    Disable,
    Destroy,
    Play,
    Stop,
    Fullscreen,
    Click,
    SwipeLeft,
    SwipeRight,
    TouchStart,
    TouchMove,
    TouchEnd,
    PageNextClick,
    PagePrevClick,
    ButtonNextClick,
    ButtonPrevClick,
}

/// A lifecycle or interaction event emitted by the controller.
#[derive(Debug, Clone)]
pub enum BookEvent {
    InitBefore,
    Init,
    InitAfter,
    Resize { width: f32, height: f32 },
    BookOpenBefore,
    BookOpen,
    BookCloseBefore,
    BookClose,
    /// The close transition finalized; the book is closed.
    BookCloseAfter,
    PageFlipBefore { page: u32 },
    PageFlip { page: u32 },
    PageFlipAfter { page: u32 },
    /// Navigation was requested past the first page.
    ClickPageFirst,
    /// Navigation was requested past the last page.
    ClickPageLast,
    UpdateUi { current_index: i32 },
    /// This instance claimed keyboard focus.
    Active,
    Enable,
    Disable,
    Destroy,
    Play,
    Stop,
    /// The host should enter fullscreen presentation.
    Fullscreen,
    Click(GestureEvent),
    SwipeLeft(GestureEvent),
    SwipeRight(GestureEvent),
    TouchStart(GestureEvent),
    TouchMove(GestureEvent),
    TouchEnd,
    PageNextClick(GestureEvent),
    PagePrevClick(GestureEvent),
    ButtonNextClick,
    ButtonPrevClick,
}

impl BookEvent {
    pub fn kind(&self) -> BookEventKind {
        match self {
            BookEvent::InitBefore => BookEventKind::InitBefore,
            BookEvent::Init => BookEventKind::Init,
            BookEvent::InitAfter => BookEventKind::InitAfter,
            BookEvent::Resize { .. } => BookEventKind::Resize,
            BookEvent::BookOpenBefore => BookEventKind::BookOpenBefore,
            BookEvent::BookOpen => BookEventKind::BookOpen,
            BookEvent::BookCloseBefore => BookEventKind::BookCloseBefore,
            BookEvent::BookClose => BookEventKind::BookClose,
            BookEvent::BookCloseAfter => BookEventKind::BookCloseAfter,
            BookEvent::PageFlipBefore { .. } => BookEventKind::PageFlipBefore,
            BookEvent::PageFlip { .. } => BookEventKind::PageFlip,
            BookEvent::PageFlipAfter { .. } => BookEventKind::PageFlipAfter,
            BookEvent::ClickPageFirst => BookEventKind::ClickPageFirst,
            BookEvent::ClickPageLast => BookEventKind::ClickPageLast,
            BookEvent::UpdateUi { .. } => BookEventKind::UpdateUi,
            BookEvent::Active => BookEventKind::Active,
            BookEvent::Enable => BookEventKind::Enable,
            BookEvent::Disable => BookEventKind::Disable,
            BookEvent::Destroy => BookEventKind::Destroy,
            BookEvent::Play => BookEventKind::Play,
            BookEvent::Stop => BookEventKind::Stop,
            BookEvent::Fullscreen => BookEventKind::Fullscreen,
            BookEvent::Click(_) => BookEventKind::Click,
            BookEvent::SwipeLeft(_) => BookEventKind::SwipeLeft,
            BookEvent::SwipeRight(_) => BookEventKind::SwipeRight,
            BookEvent::TouchStart(_) => BookEventKind::TouchStart,
            BookEvent::TouchMove(_) => BookEventKind::TouchMove,
            BookEvent::TouchEnd => BookEventKind::TouchEnd,
            BookEvent::PageNextClick(_) => BookEventKind::PageNextClick,
            BookEvent::PagePrevClick(_) => BookEventKind::PagePrevClick,
            BookEvent::ButtonNextClick => BookEventKind::ButtonNextClick,
            BookEvent::ButtonPrevClick => BookEventKind::ButtonPrevClick,
        }
    }
}
