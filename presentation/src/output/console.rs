//! Console output formatter for admissions and group reports

use cohort_application::{Admission, GroupReport, ScheduledGroup};
use colored::Colorize;

/// Formats admission results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a single admission
    pub fn format_admission(admission: &Admission) -> String {
        let mut output = String::new();

        let verb = if admission.newly_created {
            "opened".green().bold()
        } else {
            "joined".cyan().bold()
        };

        output.push_str(&format!(
            "{} {} group {}\n",
            format!("Patient {}", admission.member.patient_id).bold(),
            verb,
            admission.group.id
        ));
        output.push_str(&format!(
            "  {} {} ({})\n",
            "Category:".cyan(),
            admission.category,
            admission.category.label()
        ));
        output.push_str(&format!(
            "  {} {} / {}\n",
            "Clinician:".cyan(),
            admission.group.clinician_name,
            admission.group.department
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Scheduled:".cyan(),
            admission.group.scheduled_time.to_rfc3339()
        ));

        let priority = if admission.priority.is_urgent() {
            admission.priority.to_string().red().bold()
        } else {
            admission.priority.to_string().normal()
        };
        output.push_str(&format!("  {} {}\n", "Priority:".cyan(), priority));

        output
    }

    /// Format all admissions as JSON
    pub fn format_admissions_json(admissions: &[Admission]) -> String {
        serde_json::to_string_pretty(admissions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the clinician-facing report for one group
    pub fn format_group_report(report: &GroupReport) -> String {
        let mut output = String::new();
        let group = &report.group;
        let summary = &report.summary;

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "== Group {} | {} | {} ==",
                group.id,
                group.category.label(),
                group.clinician_name
            )
            .yellow()
            .bold()
        ));

        output.push_str(&format!(
            "{} {} / {}\n",
            "Patients:".cyan().bold(),
            summary.total_members,
            group.max_capacity
        ));

        if summary.total_members == 0 {
            output.push_str("No patients admitted yet.\n");
            return output;
        }

        if !summary.symptom_counts.is_empty() {
            output.push_str(&format!("\n{}\n", "Top symptoms:".cyan().bold()));
            for (symptom, count) in summary.top_symptoms(3) {
                output.push_str(&format!("  * {} ({})\n", symptom, count));
            }
        }

        if !summary.severity_counts.is_empty() {
            output.push_str(&format!("\n{}\n", "Severity:".cyan().bold()));
            for (severity, count) in &summary.severity_counts {
                output.push_str(&format!("  * {}: {}\n", severity, count));
            }
        }

        if !summary.duration_counts.is_empty() {
            output.push_str(&format!("\n{}\n", "Duration:".cyan().bold()));
            for (duration, count) in &summary.duration_counts {
                output.push_str(&format!("  * {}: {}\n", duration, count));
            }
        }

        if !summary.urgent_patients.is_empty() {
            output.push_str(&format!("\n{}\n", "Needs attention:".red().bold()));
            for patient in &summary.urgent_patients {
                output.push_str(&format!("  * {}\n", patient));
            }
        }

        output.push_str(&format!("\n{}\n", "Members:".cyan().bold()));
        for (index, detail) in summary.member_details.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (priority {})\n",
                index + 1,
                detail.patient_id,
                detail.priority
            ));
            output.push_str(&format!("     Symptoms:    {}\n", detail.symptoms));
            output.push_str(&format!("     Severity:    {}\n", detail.severity));
            output.push_str(&format!("     Duration:    {}\n", detail.duration));
            output.push_str(&format!("     Medications: {}\n", detail.medications));
            output.push_str(&format!("     Allergies:   {}\n", detail.allergies));
        }

        output
    }

    /// Format the group report as JSON
    pub fn format_group_report_json(report: &GroupReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a clinician's scheduled groups
    pub fn format_schedule(clinician_name: &str, schedule: &[ScheduledGroup]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{}\n",
            format!("== Schedule: {} ==", clinician_name).yellow().bold()
        ));

        if schedule.is_empty() {
            output.push_str("No groups scheduled.\n");
            return output;
        }

        for entry in schedule {
            output.push_str(&format!(
                "  * {} | {} | {} / {} patient(s)\n",
                entry.group.scheduled_time.to_rfc3339(),
                entry.group.category.label(),
                entry.member_count,
                entry.group.max_capacity
            ));
        }

        output
    }

    /// Format a clinician's schedule as JSON
    pub fn format_schedule_json(schedule: &[ScheduledGroup]) -> String {
        serde_json::to_string_pretty(schedule).unwrap_or_else(|_| "[]".to_string())
    }
}
