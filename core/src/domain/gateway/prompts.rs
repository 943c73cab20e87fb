pub const RECIPE_COUNT: usize = 3;

pub const INGREDIENT_DETECTION_PROMPT: &str = "Identify all the food ingredients and vegetables visible in this pantry or fridge photo. Return them as a JSON array of objects with 'name' and 'category' (e.g., vegetable, fruit, dairy, protein, pantry staple). Be as specific as possible.";

pub fn build_recipe_prompt(ingredient_names: &[String]) -> String {
    format!(
        "Based on these ingredients: {}, suggest {} creative, quick, and healthy recipes.\n\
         Focus on reducing food waste by using as many of the provided ingredients as possible.\n\
         Provide structured JSON output with title, description, time (e.g. \"20 mins\"), difficulty, ingredients, instructions, and a specific 'wasteReductionTip' for one of the main ingredients used.",
        ingredient_names.join(", "),
        RECIPE_COUNT
    )
}
