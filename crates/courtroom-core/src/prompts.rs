//! Prompts for the hosted models: persona drafting and courtroom portraits.

/// Persona drafting prompt. `{persona_description}` is replaced with the agent's description.
pub const PERSONA_PROMPT_TEMPLATE: &str = r#"1. I'll provide you with a description of the persona I want to create
2. You will take this description and creatively fill out a robust profile
   that matches or exceeds the detail found in the provided example
3. Do not include explanation or comments. Only a string that can be
   deserialized
4. Can be either man or woman
5. Person should not be fancy or posh. Just a regular, run of the mill citizen
   from American midwest or Florida-type society. Definitely the type of
   person that shops at Walmart.
6. Never include punctuation like quotes or single quotes. Spell out feet and inches

PERSONA EXAMPLE:
{
  name: "Sarah Chen",
  age: "34",
  occupation: "Food Truck Owner",
  physical_description: "Stark black hair, brown eyes, short stature. Pent up energy ready to explode.",
  personality: "Determined, quick-witted, sometimes stubborn. Values family traditions but seeks to modernize them.",
  details: {
    children: 1,
    criminal_background: "clean",
    personalHistory: "Born to immigrant parents who ran a restaurant in Flushing. Learned cooking from grandmother. Started food truck business after culinary school debt forced restaurant dreams to be put on hold.",
    motivations: "Wants to prove that modern fusion cuisine can honor traditional recipes. Dreams of opening her own restaurant.",
    relationships: "Close with grandmother (mentor), competitive with sister (successful restaurant owner), supportive parents who don't quite understand fusion cuisine",
    quirks: "Names all her cooking utensils. Refuses to cook on Mondays due to family superstition.",
    location: "Brooklyn, NY",
  }
};

DESIRED PERSONA DESCRIPTION:
{persona_description}
"#;

/// Portrait prompt. `{persona_struct}` is the persona text produced by the drafting step.
pub const PORTRAIT_PROMPT_TEMPLATE: &str = "photo realistic front facing capture of a person \
entering a courtroom who is fully described as {persona_struct}";

pub fn persona_prompt(persona_description: &str) -> String {
    PERSONA_PROMPT_TEMPLATE.replace("{persona_description}", persona_description)
}

pub fn portrait_prompt(persona_struct: &str) -> String {
    PORTRAIT_PROMPT_TEMPLATE.replace("{persona_struct}", persona_struct)
}
