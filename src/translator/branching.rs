use super::{pop_d, svec, Translator};

impl Translator {
    /// Convert VM label to Hack ASM symbol - for consistency across instructions
    fn label_to_sym(&self, label: &str) -> String {
        if self.function.is_empty() {
            label.to_string()
        } else {
            format!("{}${}", self.function, label)
        }
    }

    pub(super) fn label(&self, label: &str) -> Vec<String> {
        svec![format!("({})", self.label_to_sym(label))]
    }

    pub(super) fn goto(&self, label: &str) -> Vec<String> {
        svec![
            format!("@{}", self.label_to_sym(label)),
            "0;JMP" // Unconditional jump
        ]
    }

    pub(super) fn if_goto(&self, label: &str) -> Vec<String> {
        let mut lines = pop_d();
        lines.extend(svec![
            format!("@{}", self.label_to_sym(label)),
            "D;JNE" // False is 0
        ]);
        lines
    }
}
