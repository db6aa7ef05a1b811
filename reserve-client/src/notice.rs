//! Interaction-boundary notices
//!
//! Every failure that reaches a front end becomes a [`Notice`]: a localized
//! message plus hints about what the front end should do next. Transport
//! failures get the operation's generic message and the cause goes to the log.

use shared::lifecycle::RuleViolation;
use shared::{ErrorCode, LifecycleError};

use crate::ClientError;
use crate::error::ErrorKind;

/// What the user was doing when the notice was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    ListReservations,
    ShowReservation,
    UpdateStatus,
    EditReservation,
    Book,
    ListTables,
    AddTable,
    UpdateTable,
}

impl Operation {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ListReservations => "list_reservations",
            Self::ShowReservation => "show_reservation",
            Self::UpdateStatus => "update_status",
            Self::EditReservation => "edit_reservation",
            Self::Book => "book",
            Self::ListTables => "list_tables",
            Self::AddTable => "add_table",
            Self::UpdateTable => "update_table",
        }
    }

    /// Generic message shown when the cause is not the user's to fix
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::Login => "登录失败，请稍后重试",
            Self::Register => "注册失败，请稍后重试",
            Self::ListReservations => "获取预订信息失败",
            Self::ShowReservation => "获取预订信息失败",
            Self::UpdateStatus => "更新预订信息失败",
            Self::EditReservation => "更新预订信息失败",
            Self::Book => "预订失败，请稍后重试",
            Self::ListTables => "获取餐桌信息失败",
            Self::AddTable => "添加餐桌失败",
            Self::UpdateTable => "修改餐桌失败",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub code: ErrorCode,
    pub message: String,
    /// Front end should send the user to the login screen
    pub redirect_to_login: bool,
    /// Front end should ask for a verification code and retry the login
    pub prompt_verification: bool,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            code: ErrorCode::Success,
            message: message.into(),
            redirect_to_login: false,
            prompt_verification: false,
        }
    }

    fn failure(level: NoticeLevel, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            redirect_to_login: false,
            prompt_verification: false,
        }
    }

    pub fn from_error(operation: Operation, error: &ClientError) -> Self {
        let code = error.code();
        match error.kind() {
            ErrorKind::Unauthenticated => Self {
                redirect_to_login: true,
                ..Self::failure(NoticeLevel::Warning, code, "未登录，请先登录")
            },
            ErrorKind::VerificationRequired => {
                let message = match error {
                    ClientError::VerificationRequired(m) if !m.is_empty() => m.clone(),
                    _ => "请输入验证码".to_string(),
                };
                Self {
                    prompt_verification: true,
                    ..Self::failure(NoticeLevel::Warning, code, message)
                }
            }
            ErrorKind::Busy => Self::failure(NoticeLevel::Warning, code, "正在提交，请稍候"),
            ErrorKind::Unauthorized | ErrorKind::InvalidTransition | ErrorKind::Validation => {
                let message = match error {
                    ClientError::Lifecycle(e) => lifecycle_message(e),
                    _ => operation.failure_message().to_string(),
                };
                Self::failure(NoticeLevel::Warning, code, message)
            }
            ErrorKind::Backend => {
                let message = match error {
                    ClientError::Backend(m) | ClientError::InvalidCredentials(m)
                        if !m.is_empty() =>
                    {
                        m.clone()
                    }
                    ClientError::ReservationNotFound(_) => "未找到预订信息".to_string(),
                    ClientError::TableNotFound(_) => "未找到餐桌信息".to_string(),
                    _ => operation.failure_message().to_string(),
                };
                Self::failure(NoticeLevel::Error, code, message)
            }
            ErrorKind::Transport => {
                tracing::error!(operation = operation.name(), error = %error, "Request failed");
                Self::failure(NoticeLevel::Error, code, operation.failure_message())
            }
        }
    }
}

fn lifecycle_message(error: &LifecycleError) -> String {
    match error {
        LifecycleError::Unauthorized { .. } | LifecycleError::EditForbidden(_) => {
            "无权执行此操作".to_string()
        }
        LifecycleError::RoleRequired { .. } => "需要员工权限".to_string(),
        LifecycleError::InvalidTransition { from, .. } if from.is_terminal() => {
            format!("预订{}，无法再更改", from.label())
        }
        LifecycleError::InvalidTransition { from, to } => {
            format!("{}的预订不能变更为{}", from.label(), to.label())
        }
        LifecycleError::NotEditable(status) => format!("{}的预订不能修改", status.label()),
        LifecycleError::Validation(v) => violation_message(v),
    }
}

fn violation_message(violation: &RuleViolation) -> String {
    match violation {
        RuleViolation::PartySizeOutOfRange { min, max, .. } => {
            format!("用餐人数需在{min}到{max}人之间")
        }
        RuleViolation::BookingDateTooEarly { earliest, .. } => {
            format!("预订日期最早为{earliest}")
        }
        RuleViolation::SeatCountOutOfRange { min, max, .. } => {
            format!("餐桌人数需在{min}到{max}人之间")
        }
        RuleViolation::SeatCountTaken(seats) => format!("已存在{seats}人桌"),
        RuleViolation::SeatCountDecrease { current, .. } => {
            format!("餐桌人数不能少于当前人数({current}人)")
        }
        RuleViolation::NoTablesAvailable => "暂无可预订的餐桌".to_string(),
        RuleViolation::PasswordMismatch => "两次输入的密码不一致".to_string(),
        RuleViolation::InvalidField(_) => "请填写完整信息".to_string(),
    }
}
