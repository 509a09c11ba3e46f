//! Display strings for the two supported languages.
//!
//! Switching language only changes what the screen says. The poll itself
//! never sees it, except for the default name given to added options.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Chinese,
            Language::Chinese => Language::English,
        }
    }

    /// Label of the language switch: names the language you would switch to.
    pub fn switch_label(self) -> &'static str {
        match self {
            Language::English => "中",
            Language::Chinese => "EN",
        }
    }

    pub fn text(self, key: Text) -> &'static str {
        match self {
            Language::English => english(key),
            Language::Chinese => chinese(key),
        }
    }

    /// Name given to an option added when `count` options already exist.
    pub fn new_option_name(self, count: usize) -> String {
        format!("{} {}", self.text(Text::NewOptionDefaultName), count + 1)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Title,
    Subtitle,
    ResultsTitle,
    VotesSuffix,
    ResetButton,
    PauseButton,
    ResumeButton,
    ExtendButton,
    SettingsButton,
    QuitButton,
    SettingsTitle,
    VoteOptionsTitle,
    OptionNameLabel,
    OptionColorLabel,
    AddOptionButton,
    DeleteOptionButton,
    EditNameButton,
    EditColorButton,
    AppearanceTitle,
    BackgroundColor,
    TextColor,
    PrimaryButtonColor,
    AccentColor,
    TimerTitle,
    TimerDurationLabel,
    CloseButton,
    NewOptionDefaultName,
    VotingOpen,
    VotingPaused,
    TimeUp,
    TotalVotes,
    InvalidColor,
    InvalidDuration,
    MinimumOptions,
}

fn english(key: Text) -> &'static str {
    match key {
        Text::Title => "Live Poll",
        Text::Subtitle => "Cast your vote before time runs out!",
        Text::ResultsTitle => "Live Results",
        Text::VotesSuffix => "votes",
        Text::ResetButton => "Reset",
        Text::PauseButton => "Pause",
        Text::ResumeButton => "Resume",
        Text::ExtendButton => "+10s",
        Text::SettingsButton => "Settings",
        Text::QuitButton => "Quit",
        Text::SettingsTitle => "Settings",
        Text::VoteOptionsTitle => "Vote Options",
        Text::OptionNameLabel => "Option name",
        Text::OptionColorLabel => "Option color",
        Text::AddOptionButton => "Add option",
        Text::DeleteOptionButton => "Delete",
        Text::EditNameButton => "Rename",
        Text::EditColorButton => "Color",
        Text::AppearanceTitle => "Appearance",
        Text::BackgroundColor => "Background color",
        Text::TextColor => "Text color",
        Text::PrimaryButtonColor => "Primary button color",
        Text::AccentColor => "Accent color",
        Text::TimerTitle => "Timer",
        Text::TimerDurationLabel => "Round length (seconds)",
        Text::CloseButton => "Close",
        Text::NewOptionDefaultName => "Option",
        Text::VotingOpen => "Voting open",
        Text::VotingPaused => "Paused",
        Text::TimeUp => "Time's up",
        Text::TotalVotes => "Total",
        Text::InvalidColor => "Invalid color, use #RRGGBB",
        Text::InvalidDuration => "Invalid duration, use a whole number of seconds",
        Text::MinimumOptions => "A poll needs at least two options",
    }
}

fn chinese(key: Text) -> &'static str {
    match key {
        Text::Title => "实时投票",
        Text::Subtitle => "在倒计时结束前投出你的一票！",
        Text::ResultsTitle => "实时结果",
        Text::VotesSuffix => "票",
        Text::ResetButton => "重置",
        Text::PauseButton => "暂停",
        Text::ResumeButton => "继续",
        Text::ExtendButton => "+10秒",
        Text::SettingsButton => "设置",
        Text::QuitButton => "退出",
        Text::SettingsTitle => "设置",
        Text::VoteOptionsTitle => "投票选项",
        Text::OptionNameLabel => "选项名称",
        Text::OptionColorLabel => "选项颜色",
        Text::AddOptionButton => "添加选项",
        Text::DeleteOptionButton => "删除",
        Text::EditNameButton => "改名",
        Text::EditColorButton => "颜色",
        Text::AppearanceTitle => "外观",
        Text::BackgroundColor => "背景颜色",
        Text::TextColor => "文字颜色",
        Text::PrimaryButtonColor => "主按钮颜色",
        Text::AccentColor => "强调色",
        Text::TimerTitle => "计时器",
        Text::TimerDurationLabel => "每轮时长（秒）",
        Text::CloseButton => "关闭",
        Text::NewOptionDefaultName => "选项",
        Text::VotingOpen => "投票进行中",
        Text::VotingPaused => "已暂停",
        Text::TimeUp => "时间到",
        Text::TotalVotes => "总计",
        Text::InvalidColor => "颜色无效，请使用 #RRGGBB",
        Text::InvalidDuration => "时长无效，请输入整数秒",
        Text::MinimumOptions => "投票至少需要两个选项",
    }
}
