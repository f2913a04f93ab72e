use super::domain::ReferenceEntry;

/// The three dependent selection levels below the state dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeLevel {
    District,
    PoliceStation,
    PostOffice,
}

impl CascadeLevel {
    const ALL: [CascadeLevel; 3] = [
        CascadeLevel::District,
        CascadeLevel::PoliceStation,
        CascadeLevel::PostOffice,
    ];

    fn index(self) -> usize {
        match self {
            CascadeLevel::District => 0,
            CascadeLevel::PoliceStation => 1,
            CascadeLevel::PostOffice => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CascadeLevel::District => "district",
            CascadeLevel::PoliceStation => "police station",
            CascadeLevel::PostOffice => "post office",
        }
    }
}

/// Lifecycle of one dependent option list. `Failed` behaves like an empty
/// list; the failure is logged by the caller and never retried here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionListState {
    #[default]
    Empty,
    Loading,
    Loaded(Vec<ReferenceEntry>),
    Failed,
}

impl OptionListState {
    pub fn entries(&self) -> &[ReferenceEntry] {
        match self {
            OptionListState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries().iter().any(|entry| entry.id == id)
    }
}

/// Handed out by [`Cascade::begin`]; a completion is applied only while its
/// ticket is still the newest one issued for that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeTicket {
    level: CascadeLevel,
    generation: u64,
}

impl CascadeTicket {
    pub fn level(&self) -> CascadeLevel {
        self.level
    }
}

/// Dependent-list state machine for district, police station, and post
/// office options. Beginning a fetch clears the level and everything
/// strictly downstream, so stale options are never shown while a new parent
/// resolves. Responses to superseded fetches are dropped by generation
/// comparison instead of letting the last arrival win.
#[derive(Debug, Default)]
pub struct Cascade {
    levels: [OptionListState; 3],
    generations: [u64; 3],
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn districts(&self) -> &OptionListState {
        &self.levels[CascadeLevel::District.index()]
    }

    pub fn police_stations(&self) -> &OptionListState {
        &self.levels[CascadeLevel::PoliceStation.index()]
    }

    pub fn post_offices(&self) -> &OptionListState {
        &self.levels[CascadeLevel::PostOffice.index()]
    }

    /// Start a fetch for `level`: the level goes to `Loading`, downstream
    /// levels reset to `Empty`, and a ticket for this fetch is returned.
    pub fn begin(&mut self, level: CascadeLevel) -> CascadeTicket {
        self.clear_from(level);
        self.levels[level.index()] = OptionListState::Loading;
        self.generations[level.index()] += 1;
        CascadeTicket {
            level,
            generation: self.generations[level.index()],
        }
    }

    /// Apply a fetch outcome. Returns `false` when the ticket was
    /// superseded by a newer `begin` for the same level.
    pub fn complete(
        &mut self,
        ticket: CascadeTicket,
        outcome: Result<Vec<ReferenceEntry>, ()>,
    ) -> bool {
        let index = ticket.level.index();
        if ticket.generation != self.generations[index] {
            return false;
        }
        self.levels[index] = match outcome {
            Ok(entries) => OptionListState::Loaded(entries),
            Err(()) => OptionListState::Failed,
        };
        true
    }

    /// Reset `level` and everything strictly downstream of it.
    pub fn clear_from(&mut self, level: CascadeLevel) {
        for candidate in CascadeLevel::ALL {
            if candidate.index() >= level.index() {
                self.levels[candidate.index()] = OptionListState::Empty;
                self.generations[candidate.index()] += 1;
            }
        }
    }
}
