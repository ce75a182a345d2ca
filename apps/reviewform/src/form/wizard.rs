use serde::Serialize;

/// One of the three form stages. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WizardStep {
    #[default]
    Step1,
    Step2,
    Step3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Step1, WizardStep::Step2, WizardStep::Step3];

    /// Element id of the step's panel in the form view.
    pub const fn id(self) -> &'static str {
        match self {
            WizardStep::Step1 => "wizardStepOne",
            WizardStep::Step2 => "wizardStepTwo",
            WizardStep::Step3 => "wizardStepThree",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            WizardStep::Step1 => WizardStep::Step2,
            WizardStep::Step2 | WizardStep::Step3 => WizardStep::Step3,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            WizardStep::Step1 | WizardStep::Step2 => WizardStep::Step1,
            WizardStep::Step3 => WizardStep::Step2,
        }
    }
}

/// Tracks the active step. Navigation is caller-driven and never validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardController {
    current: WizardStep,
}

impl WizardController {
    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn is_active(&self, step: WizardStep) -> bool {
        self.current == step
    }

    pub fn go_to(&mut self, step: WizardStep) {
        self.current = step;
    }

    pub fn next(&mut self) -> WizardStep {
        self.current = self.current.next();
        self.current
    }

    pub fn previous(&mut self) -> WizardStep {
        self.current = self.current.previous();
        self.current
    }

    pub fn is_final(&self) -> bool {
        self.current == WizardStep::Step3
    }
}
