//! Page and layout-set data management: which grid sets sit on which A4
//! page, and which image fills each set. Pure bookkeeping; rendering the
//! grids themselves is out of scope.

/// The predefined grid sets a user can place on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    SetA,
    SetB,
    SetC,
    SetD,
    SetE,
    Wallet,
    Print2R,
    Print3R,
}

impl SheetLayout {
    pub const ALL: [SheetLayout; 8] = [
        Self::SetA,
        Self::SetB,
        Self::SetC,
        Self::SetD,
        Self::SetE,
        Self::Wallet,
        Self::Print2R,
        Self::Print3R,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::SetA => "Set A",
            Self::SetB => "Set B",
            Self::SetC => "Set C",
            Self::SetD => "Set D",
            Self::SetE => "Set E",
            Self::Wallet => "WS",
            Self::Print2R => "2R",
            Self::Print3R => "3R",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SetA => "Two large and eight small cells",
            Self::SetB => "Four medium cells",
            Self::SetC => "One large and four small cells",
            Self::SetD => "Six medium cells",
            Self::SetE => "Mixed large and medium cells",
            Self::Wallet => "Wallet-size grid",
            Self::Print2R => "2R print cells",
            Self::Print3R => "3R print cells",
        }
    }
}

/// One grid set placed on a page, filled with a gallery asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSet {
    pub layout: SheetLayout,
    pub asset_id: u64,
}

/// The document: an ordered list of A4 pages, each holding placed sets, plus
/// the page currently being edited.
#[derive(Debug)]
pub struct PageBook {
    pages: Vec<Vec<PlacedSet>>,
    current: usize,
}

impl Default for PageBook {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBook {
    /// Starts with a single empty page, like a fresh document.
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &[PlacedSet] {
        &self.pages[self.current]
    }

    pub fn page(&self, index: usize) -> Option<&[PlacedSet]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Appends an empty page and switches to it.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
        self.current
    }

    pub fn switch_page(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Places a set on the current page.
    pub fn add_set(&mut self, layout: SheetLayout, asset_id: u64) {
        self.pages[self.current].push(PlacedSet { layout, asset_id });
    }

    /// Removes the set at `index` from the current page. Out-of-range
    /// indices are ignored.
    pub fn remove_set(&mut self, index: usize) -> bool {
        let page = &mut self.pages[self.current];
        if index < page.len() {
            page.remove(index);
            true
        } else {
            false
        }
    }

    /// True when no page holds any set; exports have nothing to do then.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(Vec::is_empty)
    }
}
