use serde_json::Value;

/// Standing instructions sent as the system message of every classification.
pub const SYSTEM_PROMPT: &str = include_str!("../../data/auditor-context.txt");

/// Keeps the first `max` identifiers, in order.
pub fn truncate_batch(rfcs: &[String], max: usize) -> &[String] {
    &rfcs[..rfcs.len().min(max)]
}

/// Embeds the batch into the classification template. The reply schema here
/// is what `AnalysisResult` and the dashboard expect.
pub fn build_prompt(rfcs: &[String]) -> String {
    let rfc_list = Value::from(rfcs.to_vec()).to_string();

    format!(
        "Analiza los siguientes {count} RFCs extraídos de un respaldo contable real:\n\n\
        RFCs: {rfc_list}\n\n\
        INSTRUCCIONES:\n\
        1. Identifica patrones sospechosos.\n\
        2. Clasifica cada RFC en uno de cuatro niveles de riesgo: LOW (bajo), MEDIUM (medio), HIGH (alto), CRITICAL (crítico).\n\
        3. Genera recomendaciones específicas para cada RFC señalado.\n\n\
        Responde ÚNICAMENTE con JSON con esta estructura exacta:\n\
        {{\n  \"total_rfcs_analyzed\": número,\n  \
        \"risk_summary\": {{\"low\": número, \"medium\": número, \"high\": número, \"critical\": número}},\n  \
        \"flagged_rfcs\": [\n    {{\"rfc\": \"string\", \"risk_level\": \"MEDIUM|HIGH|CRITICAL\", \"reason\": \"descripción\", \"recommendation\": \"acción\"}}\n  ],\n  \
        \"general_observations\": \"string\",\n  \
        \"compliance_score\": número_de_0_a_100\n}}\n",
        count = rfcs.len(),
    )
}
