//! Which operations need confirmation and how

/// How an operation must be confirmed before it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Run immediately
    None,
    /// Show the command and ask yes/no
    Preview,
    /// Require typing an expected value
    TypeToConfirm,
}

/// Every user-triggered command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RefreshContainers,
    CheckDaemonStatus,
    ListImages,
    InspectImage,
    FollowLogs,
    StartContainer,
    StopContainer,
    PullImage,
    BuildImage,
    StartDaemon,
    DeleteContainer,
    DeleteImage,
    PruneImages,
    StopDaemon,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RefreshContainers => "Refresh",
            Self::CheckDaemonStatus => "Daemon status",
            Self::ListImages => "List images",
            Self::InspectImage => "Inspect image",
            Self::FollowLogs => "Tail logs",
            Self::StartContainer => "Start container",
            Self::StopContainer => "Stop container",
            Self::PullImage => "Pull image",
            Self::BuildImage => "Build image",
            Self::StartDaemon => "Start daemon",
            Self::DeleteContainer => "Delete container",
            Self::DeleteImage => "Delete image",
            Self::PruneImages => "Prune images",
            Self::StopDaemon => "Stop daemon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::RefreshContainers => "Reload the container list",
            Self::CheckDaemonStatus => "Ask the container system for its status",
            Self::ListImages => "Reload the image list",
            Self::InspectImage => "Show the image configuration",
            Self::FollowLogs => "Follow container output",
            Self::StartContainer => "Start a stopped container",
            Self::StopContainer => "Stop a running container",
            Self::PullImage => "Download an image from a registry",
            Self::BuildImage => "Build an image from a Containerfile or Dockerfile",
            Self::StartDaemon => "Start the container system services",
            Self::DeleteContainer => "Permanently remove a stopped container",
            Self::DeleteImage => "Permanently remove a local image",
            Self::PruneImages => "Remove all unused images",
            Self::StopDaemon => "Stop the container system services",
        }
    }

    /// Policy with type-to-confirm enabled
    pub fn default_policy(&self) -> ConfirmPolicy {
        match self {
            Self::RefreshContainers
            | Self::CheckDaemonStatus
            | Self::ListImages
            | Self::InspectImage
            | Self::FollowLogs => ConfirmPolicy::None,
            Self::StartContainer
            | Self::StopContainer
            | Self::PullImage
            | Self::BuildImage
            | Self::StartDaemon => ConfirmPolicy::Preview,
            Self::DeleteContainer | Self::DeleteImage | Self::PruneImages | Self::StopDaemon => {
                ConfirmPolicy::TypeToConfirm
            }
        }
    }

    /// Policy after applying the destructive-confirmation preference
    ///
    /// Disabling typed confirmation still leaves a preview in place.
    pub fn policy(&self, confirm_destructive: bool) -> ConfirmPolicy {
        match self.default_policy() {
            ConfirmPolicy::TypeToConfirm if !confirm_destructive => ConfirmPolicy::Preview,
            policy => policy,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
