//! Prompt builders for the chat passes.
//!
//! Each builder appends the source text after a fixed instruction block.
//! The instruction blocks define the JSON contract the rest of the
//! backend decodes, so edits here must stay in sync with the models in
//! `lecta-models`.

/// System message for the structured-analysis pass.
pub const ANALYSIS_SYSTEM: &str = "You are an academic teaching analyst who processes classroom \
transcripts into structured insights for teachers. Your output must be a valid JSON object.";

/// System message for the pedagogical-notes pass.
pub const NOTES_SYSTEM: &str =
    "You must output a single valid JSON object only. No markdown, commentary, or preamble.";

/// System message for the syllabus-roadmap pass.
pub const ROADMAP_SYSTEM: &str = "You generate only valid, detailed academic planning JSON for \
each class day. Never produce non-JSON output.";

const ANALYSIS_INSTRUCTIONS: &str = r#"You are a university-level lecture synthesis and academic content structuring assistant.
Your task is to carefully analyze the following classroom transcript and produce a clear, comprehensive, and pedagogically organized summary of the lecture.
The goal is to transform raw spoken content into instructionally valuable, publication-quality study notes.

Your output MUST be *only* a valid JSON object with no extra commentary, markdown, or code fences.
The JSON object must include the following keys and subkeys exactly as listed:

#### 1. "topicsCovered"
A list of objects capturing the structure and flow of the lecture.
Each object must include:
- "topic" (string) - The primary subject or concept discussed.
- "subtopics" (list of strings) - Subthemes or secondary concepts under that main topic, listed in the order presented during the lecture.
- Include mention of any transitions between topics.

#### 2. "keyPoints"
A list of objects summarizing detailed explanations for each topic.
Each object must include:
- "topic" (string) - The topic these points relate to.
- "points" (list of strings) - Multi-sentence, well-developed explanations of:
  - Definitions, reasoning, and conceptual elaboration;
  - Instructor arguments, examples, or key insights;
  - Comparisons, relationships, or cause-effect logic between ideas;
  - Any mentioned data, formulas, or specialized terminology (with contextual explanation);
  - Teaching cues or rhetorical clarifications that helped illustrate the concept.

#### 3. "questionsAsked"
A list of objects representing interactive dialogue and inquiry during the lecture.
Each object must include:
- "question" (string) - The exact or paraphrased question asked.
- "who_asked" (string) - Identify who asked the question (Student, Instructor).
- "who_answered" (string) - Identify who answered the question (Student, Instructor).
- "topic" (string) - The specific topic or subtopic the question relates to.
- "answer" (string) - A complete explanation of the response given.
- "learningValue" (string) - A short description of how this question-and-answer exchange deepened understanding.

#### 4. "examplesUsed"
A list of objects documenting all illustrative materials used in the lecture.
Each object must include:
- "example" (string) - The name or short description of the example, case study, or analogy.
- "topic" (string) - The concept or theory it was meant to illustrate.
- "explanation" (string) - A step-by-step explanation of how the example clarified, simplified, or contextualized the concept.
- "connectionToConcept" (string) - How this example reinforced theoretical understanding or bridged abstract ideas to practical applications.

#### 5. "summaryInsight"
An object synthesizing the full lecture meaning and pedagogical message.
This object must include:
- "mainIdeas" (list of strings) - A cohesive synthesis of the lecture's major themes, structured in logical flow.
- "keyTakeaway" (string) - The central conceptual or applied insight that the instructor wanted students to retain.
- "connectionToBroaderCourseThemes" (string) - A reflection on how this lecture ties into broader course objectives, future lessons, or real-world implications."#;

const NOTES_INSTRUCTIONS: &str = r#"You are a university-level instructional designer and academic content synthesis expert,
tasked with producing final, publication-quality lecture notes from a full classroom transcript.

Your notes must read like a complete, pedagogically designed lecture document, suitable for:
- student distribution, and
- instructor delivery as a teaching script.

### PRIMARY OBJECTIVE
Transform the transcript into cohesive, detailed, and instructionally sound notes that:
- present full conceptual explanations with reasoning and examples,
- integrate instructor cues, real-world analogies, and examples fluidly,
- maintain a didactic structure (Introduction, Subtopics, Explanations, Applications, Summary),
- and sound formally academic yet conversational, as if read aloud in a university lecture.

Avoid shallow or one-line answers. Every list item or point must be multi-sentence, explanatory, and instructional.

### OUTPUT FORMAT
Return a single valid JSON object with this structure:

{
  "main_topic": "...",
  "learning_objectives": ["..."],
  "introduction": "Provide a complete paragraph introducing the topic, its context, relevance, and how it connects to prior or future lectures.",
  "subtopics": ["..."],
  "key_points": [
    {
      "subtopic": "...",
      "points": [
        "Each point should be a multi-sentence paragraph explaining the idea, including what it is, why it matters, and how it fits within the lecture theme."
      ]
    }
  ],
  "examples_and_explanations": [
    {
      "subtopic": "...",
      "example": "Clearly name or describe the example used by the instructor.",
      "step_by_step_explanation": "Explain the example step by step, connecting each part to underlying principles or theories.",
      "connection_to_concept": "Discuss what this example teaches or clarifies about the concept."
    }
  ],
  "case_studies_or_applications": [
    {
      "context": "Specify the practical or real-world setting.",
      "description": "Summarize what occurred or was discussed.",
      "lesson": "Explain what conceptual or applied insight the case illustrates."
    }
  ],
  "comparisons": [
    {
      "concept": "State the two items or paradigms compared.",
      "feature_a": "Describe feature or approach A in detail.",
      "feature_b": "Describe feature or approach B in detail.",
      "difference": "Offer a clear, paragraph-length discussion of how and why they differ and when each is preferred."
    }
  ],
  "activities_or_demonstrations": [
    {
      "activity": "Describe the classroom or lab activity.",
      "purpose": "Explain the learning goal behind the activity.",
      "process": "Provide sequential steps or what students were asked to do.",
      "key_takeaway": "Summarize the conceptual or skill-based understanding gained."
    }
  ],
  "terminology_and_definitions": [
    {
      "term": "List one technical term or keyword.",
      "definition": "Provide a full-sentence, contextual definition that captures meaning and relevance.",
      "context_used": "Indicate where or how it appeared during the lecture."
    }
  ],
  "instructor_tips_and_analogies": [
    {
      "analogy_or_tip": "Include any analogy, metaphor, or teaching shortcut mentioned.",
      "purpose": "Explain what aspect of understanding this analogy clarifies or simplifies.",
      "teaching_note": "Add how the instructor framed, demonstrated, or emphasized this analogy in class."
    }
  ],
  "questions_and_answers": [
    {
      "question": "Write the student's or instructor's question in full.",
      "answer": "Write the complete answer or explanation given.",
      "who_asked": "Identify who asked the question (Student, Instructor).",
      "who_answered": "Identify who answered the question (Student, Instructor).",
      "teaching_value": "Explain what this exchange taught the class."
    }
  ],
  "summary_and_conclusion": "Compose a multi-paragraph synthesis that ties all subtopics together, reiterates significance, and reinforces overarching principles. Integrate reflection on applications or implications if relevant.",
  "key_takeaways": [
    "Write 3-5 complete, memorable sentences capturing the main conceptual lessons of the lecture."
  ],
  "highlighted_insight": "Write one powerful statement summarizing the lecture's central insight or message."
}"#;

const ROADMAP_INSTRUCTIONS: &str = r#"You are a senior academic planner for university-level courses.
Your job is to analyze the following syllabus and build a day-by-day instructional roadmap in strict JSON format.
You must create a JSON array, where each element is a distinct instructional class day (skip entries about only policies, admin, grading, honor code, office hours, schedule/overview unless they are taught as actual content).

For each instructional day in your output, include:
- 'day': sequential integer starting at 1 (infer if not listed, and skip numbering admin/policy entries)
- 'date': string date if provided in syllabus, else null/""
- 'main_topic': the real curriculum subject taught that day (NOT policies or admin items)
- 'subtopics': list of detailed lesson modules, sections, demos for that day
- 'objectives': measurable learning goals/skills/competencies students should gain
- 'activities': list of labs, group work, in-class exercises, demonstrations, class discussions, etc.
- 'reading': all assigned chapters, papers, articles, links
- 'assignments': homework, quizzes, projects, presentations, milestones due for that day
- 'assessment_type': formal check (exam, quiz, project, peer review, etc) on this day, or blank if none
- 'resources': external links, software, slides, files, tools if in syllabus
- 'learning_outcomes': explicit or inferred learning outcomes (use objectives if not separated)

Strict instructions:
- Only count/number actual content/instructional days. Ignore any admin/policy-only entries unless they are truly being taught as material.
- If days are not clearly listed or numbering is mixed, infer a sequential order from syllabus structure, date headings, or context.
- NEVER merge or group multiple days. Output one entry per class day.
- If multiple subjects are taught in one day, use subtopics but keep one day entry.
- Always include "Midterm Exam" or "Final Exam" days as entries, even if missing other details.
- DO NOT output any text except a single, syntactically correct JSON array. No markdown, comments, explanations, or code -- just the plain JSON."#;

/// Build the structured-analysis prompt for a transcript.
pub fn analysis_prompt(transcript: &str) -> String {
    format!("{ANALYSIS_INSTRUCTIONS}\n\nTranscript:\n{transcript}")
}

/// Build the pedagogical-notes prompt for a transcript.
pub fn notes_prompt(transcript: &str) -> String {
    format!("{NOTES_INSTRUCTIONS}\n\nTranscript:\n{transcript}")
}

/// Build the syllabus-roadmap prompt for extracted syllabus text.
pub fn roadmap_prompt(syllabus_text: &str) -> String {
    format!("{ROADMAP_INSTRUCTIONS}\n\nHere is the syllabus to analyze:\n{syllabus_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_end_with_source_text() {
        let prompt = analysis_prompt("the transcript body");
        assert!(prompt.ends_with("the transcript body"));
        assert!(prompt.contains("topicsCovered"));

        let prompt = notes_prompt("spoken words");
        assert!(prompt.ends_with("spoken words"));
        assert!(prompt.contains("summary_and_conclusion"));

        let prompt = roadmap_prompt("Week 1: Intro");
        assert!(prompt.ends_with("Week 1: Intro"));
        assert!(prompt.contains("main_topic"));
    }
}
