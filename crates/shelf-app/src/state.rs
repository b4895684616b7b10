// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DisplayRow, Focus, Product, compute_rows};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub filter_text: String,
    pub in_stock_only: bool,
}

impl FilterState {
    pub fn new(filter_text: impl Into<String>, in_stock_only: bool) -> Self {
        Self {
            filter_text: filter_text.into(),
            in_stock_only,
        }
    }

    /// Returns whether the text actually changed.
    pub fn set_filter_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.filter_text == text {
            return false;
        }
        self.filter_text = text;
        true
    }

    /// Returns whether the flag actually changed.
    pub fn set_in_stock_only(&mut self, in_stock_only: bool) -> bool {
        if self.in_stock_only == in_stock_only {
            return false;
        }
        self.in_stock_only = in_stock_only;
        true
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<DisplayRow<'a>> {
        compute_rows(products, &self.filter_text, self.in_stock_only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub filter: FilterState,
    pub focus: Focus,
    pub help_visible: bool,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            focus: Focus::Search,
            help_visible: false,
            status_line: None,
        }
    }
}

impl AppState {
    pub fn with_filter(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetFilterText(String),
    PushFilterChar(char),
    PopFilterChar,
    ClearFilterText,
    SetInStockOnly(bool),
    ToggleInStockOnly,
    FocusNext,
    FocusPrev,
    ToggleHelp,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    FilterTextChanged(String),
    InStockOnlyChanged(bool),
    FocusChanged(Focus),
    HelpVisibilityChanged(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppEvent {
    pub const fn changes_rows(&self) -> bool {
        matches!(self, Self::FilterTextChanged(_) | Self::InStockOnlyChanged(_))
    }
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SetFilterText(text) => self.replace_filter_text(text),
            AppCommand::PushFilterChar(ch) => {
                let mut text = self.filter.filter_text.clone();
                text.push(ch);
                self.replace_filter_text(text)
            }
            AppCommand::PopFilterChar => {
                let mut text = self.filter.filter_text.clone();
                text.pop();
                self.replace_filter_text(text)
            }
            AppCommand::ClearFilterText => self.replace_filter_text(String::new()),
            AppCommand::SetInStockOnly(value) => self.replace_in_stock_only(value),
            AppCommand::ToggleInStockOnly => {
                let value = !self.filter.in_stock_only;
                self.replace_in_stock_only(value)
            }
            AppCommand::FocusNext => self.rotate_focus(1),
            AppCommand::FocusPrev => self.rotate_focus(-1),
            AppCommand::ToggleHelp => {
                self.help_visible = !self.help_visible;
                vec![AppEvent::HelpVisibilityChanged(self.help_visible)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn replace_filter_text(&mut self, text: String) -> Vec<AppEvent> {
        if !self.filter.set_filter_text(text) {
            return Vec::new();
        }
        vec![AppEvent::FilterTextChanged(self.filter.filter_text.clone())]
    }

    fn replace_in_stock_only(&mut self, value: bool) -> Vec<AppEvent> {
        if !self.filter.set_in_stock_only(value) {
            return Vec::new();
        }
        let label = if value {
            "in stock only"
        } else {
            "showing all stock"
        };
        vec![AppEvent::InStockOnlyChanged(value), self.set_status(label)]
    }

    fn rotate_focus(&mut self, delta: isize) -> Vec<AppEvent> {
        let all = Focus::ALL;
        let current = all
            .iter()
            .position(|focus| *focus == self.focus)
            .unwrap_or(0) as isize;
        let len = all.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = all[next];
        vec![AppEvent::FocusChanged(self.focus)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
